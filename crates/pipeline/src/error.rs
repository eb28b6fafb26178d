use std::fmt;
use std::path::PathBuf;

/// Fatal pipeline errors. Any of these aborts the run before output is written.
#[derive(Debug)]
pub enum PipelineError {
    /// Input table could not be opened or read.
    InputRead { path: PathBuf, message: String },
    /// Result lines could not be written to the sink.
    OutputWrite { path: PathBuf, message: String },
    /// Endpoint is not a usable base URL.
    InvalidEndpoint(String),
    /// HTTP client could not be constructed (TLS backend, etc.).
    HttpClient(String),
    /// Cancellation was requested at a checkpoint.
    Cancelled,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputRead { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            Self::OutputWrite { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
            Self::InvalidEndpoint(msg) => write!(f, "invalid lookup endpoint: {msg}"),
            Self::HttpClient(msg) => write!(f, "failed to build HTTP client: {msg}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Why a single name or identifier could not be resolved.
///
/// These never abort a stage; the item is reported and left out of the map.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupFailure {
    /// Server answered with a non-success status.
    Status(u16),
    /// Request never produced a readable response (connect, timeout, body read).
    Transport(String),
    /// Response body had no element with this tag.
    MissingElement(&'static str),
    /// Element was present but its text did not parse.
    Unparseable { element: &'static str, value: String },
    /// Response body was not well-formed XML.
    MalformedBody(String),
    /// Name normalized to an empty query token; no request was made.
    EmptyQuery,
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Transport(msg) => write!(f, "request failed: {msg}"),
            Self::MissingElement(tag) => write!(f, "response has no <{tag}> element"),
            Self::Unparseable { element, value } => {
                write!(f, "<{element}> value {value:?} is not a number")
            }
            Self::MalformedBody(msg) => write!(f, "malformed response: {msg}"),
            Self::EmptyQuery => write!(f, "name has no searchable characters"),
        }
    }
}
