//! Stage sequencing: ingest → identifiers → coordinates → assembly.

use std::io::Write;
use std::path::Path;

use crate::assemble::{assemble, render_lines};
use crate::cancel::CancelToken;
use crate::client::LookupClient;
use crate::error::PipelineError;
use crate::ingest::{ingest, read_table};
use crate::model::{OutputRecord, RunStats};
use crate::report::Reporter;
use crate::resolve::{resolve_coordinates, resolve_identifiers};

/// A finished resolution, ready to be written.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub records: Vec<OutputRecord>,
    pub stats: RunStats,
}

impl Resolution {
    /// Header plus one line per input row.
    pub fn lines(&self) -> Vec<String> {
        render_lines(&self.records)
    }
}

/// Owns the lookup client and the cancellation token for one run.
pub struct Pipeline {
    client: LookupClient,
    cancel: CancelToken,
}

impl Pipeline {
    pub fn new(client: LookupClient, cancel: CancelToken) -> Self {
        Self { client, cancel }
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Run every stage over already-read table text.
    ///
    /// Each stage completes before the next starts. Cancellation is
    /// checked between stages and inside each remote stage; a cancelled
    /// run returns `Err(Cancelled)` and nothing else.
    pub fn resolve_table(
        &self,
        text: &str,
        name_column: usize,
        reporter: &dyn Reporter,
    ) -> Result<Resolution, PipelineError> {
        let started_at = chrono::Utc::now().to_rfc3339();

        self.cancel.check()?;
        let tally = ingest(text, name_column);
        reporter.progress(&format!(
            "read {} row(s), {} unique name(s)",
            tally.total_rows(),
            tally.unique_names().len()
        ));

        self.cancel.check()?;
        let ids = resolve_identifiers(&self.client, tally.unique_names(), &self.cancel, reporter)?;

        self.cancel.check()?;
        let coords = resolve_coordinates(&self.client, &ids, &self.cancel, reporter)?;

        self.cancel.check()?;
        let records = assemble(tally.occurrences(), tally.counts(), &coords, reporter);

        let unresolved = tally
            .unique_names()
            .iter()
            .filter(|name| !coords.contains_key(*name))
            .cloned()
            .collect();

        Ok(Resolution {
            stats: RunStats {
                started_at,
                rows_read: tally.total_rows(),
                unique_names: tally.unique_names().len(),
                identifiers_resolved: ids.len(),
                coordinates_resolved: coords.len(),
                rows_written: records.len(),
                unresolved,
            },
            records,
        })
    }

    /// Read `input` and resolve it. Nothing is written.
    pub fn run(
        &self,
        input: &Path,
        name_column: usize,
        reporter: &dyn Reporter,
    ) -> Result<Resolution, PipelineError> {
        self.cancel.check()?;
        let text = read_table(input)?;
        self.resolve_table(&text, name_column, reporter)
    }

    /// Read `input`, resolve it, and write the result table to `output`.
    ///
    /// The output file is only created once every stage has finished.
    pub fn run_to_file(
        &self,
        input: &Path,
        output: &Path,
        name_column: usize,
        reporter: &dyn Reporter,
    ) -> Result<RunStats, PipelineError> {
        let resolution = self.run(input, name_column, reporter)?;
        self.cancel.check()?;
        write_lines(output, &resolution.lines())?;
        reporter.progress(&format!("results saved to {}", output.display()));
        Ok(resolution.stats)
    }
}

/// Write result lines to `path`, newline-terminated.
///
/// Lines go to a temporary file beside `path`, which replaces `path` only
/// after the final flush. On error `path` is left as it was.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), PipelineError> {
    let write_err = |e: std::io::Error| PipelineError::OutputWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;

    let mut writer = std::io::BufWriter::new(tmp);
    write_to(&mut writer, lines).map_err(write_err)?;
    let tmp = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Write result lines to any sink, newline-terminated, then flush.
pub fn write_to(writer: &mut dyn Write, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}
