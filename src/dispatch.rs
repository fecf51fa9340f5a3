use crate::error::{Diagnostic, LintError};
use crate::policy::LintMode;

use std::io::{self, Write};

/// Routes validator failures according to the lint mode.
pub struct Dispatcher {
    mode: LintMode,
    sink: Box<dyn Write + Send>,
    reported: u64,
}

impl Dispatcher {
    /// Report-mode output goes to stdout until [`Dispatcher::set_sink`] is called.
    pub fn new(mode: LintMode) -> Self {
        Self {
            mode,
            sink: Box::new(io::stdout()),
            reported: 0,
        }
    }

    pub fn set_sink<W: Write + Send + 'static>(&mut self, sink: W) {
        self.sink = Box::new(sink);
    }

    /// Diagnostics written so far (report mode only).
    pub fn reported(&self) -> u64 {
        self.reported
    }

    /// `Err` in error mode; in report mode the diagnostic is written and dropped.
    pub fn dispatch(&mut self, d: Diagnostic) -> Result<(), LintError> {
        match self.mode {
            LintMode::Error => Err(d.into()),
            LintMode::Report => {
                log::warn!("{d}");
                d.write_report(self.sink.as_mut())
                    .map_err(LintError::Report)?;
                self.reported += 1;
                Ok(())
            }
        }
    }

    pub fn dispatch_opt(&mut self, d: Option<Diagnostic>) -> Result<(), LintError> {
        match d {
            Some(d) => self.dispatch(d),
            None => Ok(()),
        }
    }

    pub fn flush(&mut self) -> Result<(), LintError> {
        self.sink.flush().map_err(LintError::Report)
    }
}
