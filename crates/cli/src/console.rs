//! Console reporter: progress on stdout, warnings on stderr.

use brewmap_pipeline::Reporter;

pub(crate) struct ConsoleReporter {
    show_progress: bool,
}

impl ConsoleReporter {
    /// Progress is shown unless `quiet`, and only when stdout is free for it
    /// (a terminal, and not carrying the results table or JSON summary).
    pub(crate) fn new(quiet: bool, stdout_reserved: bool) -> Self {
        let stdout_tty = atty::is(atty::Stream::Stdout);
        Self {
            show_progress: !quiet && !stdout_reserved && stdout_tty,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn progress(&self, message: &str) {
        if self.show_progress {
            println!("{}", message);
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("warning: {}", message);
    }
}
