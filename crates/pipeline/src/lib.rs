//! `brewmap-pipeline` — brewery name to coordinate resolution.
//!
//! Pure pipeline crate: reads a name column, resolves each distinct name
//! through the remote lookup service, and assembles one output line per
//! input row. No CLI dependencies; progress goes through [`Reporter`].

pub mod assemble;
pub mod cancel;
pub mod client;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod report;
pub mod resolve;
pub mod xml;

pub use cancel::CancelToken;
pub use client::LookupClient;
pub use engine::Pipeline;
pub use error::{LookupFailure, PipelineError};
pub use model::{CoordinateMap, IdentifierMap, LatLng, NameTally, OutputRecord, RunStats};
pub use report::Reporter;
