//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                                 |
//! |---------|------------------|---------------------------------------------|
//! | 0       | Universal        | Success                                     |
//! | 2       | Universal        | Usage error (bad args, missing file or key) |
//! | 3       | Universal        | I/O error reading input or writing results  |
//! | 40-49   | lookup           | Lookup service configuration                |
//! | 130     | Universal        | Interrupted (Ctrl-C)                        |
//!
//! Per-name lookup failures are never fatal and have no exit code.

use brewmap_pipeline::PipelineError;

// =============================================================================
// Universal
// =============================================================================

/// Success - every stage finished and the results were written.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing input file, missing API key.
pub const EXIT_USAGE: u8 = 2;

/// Input could not be read or output could not be written.
pub const EXIT_IO: u8 = 3;

/// Interrupted before completion; nothing was written.
pub const EXIT_INTERRUPTED: u8 = 130;

// =============================================================================
// Lookup (40-49)
// =============================================================================

/// Endpoint is not a usable http(s) base URL.
pub const EXIT_LOOKUP_ENDPOINT: u8 = 40;

/// HTTP client could not be constructed.
pub const EXIT_LOOKUP_CLIENT: u8 = 41;

/// Map a pipeline error to its exit code.
pub fn pipeline_exit_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::InputRead { .. } | PipelineError::OutputWrite { .. } => EXIT_IO,
        PipelineError::InvalidEndpoint(_) => EXIT_LOOKUP_ENDPOINT,
        PipelineError::HttpClient(_) => EXIT_LOOKUP_CLIENT,
        PipelineError::Cancelled => EXIT_INTERRUPTED,
    }
}
