//! FastQ validation engine for single and paired-end Illumina files.
//!
//! - Streaming, 4-line records, one pass, no buffering ahead.
//! - Ordered validator chains filtered by strictness level (minimum/low/high).
//! - Paired files are read in lock-step; unequal record counts are an error.
//! - Lint modes: `error` returns the first failure, `report` writes
//!   `file:code:line: description` lines and keeps going.

pub mod dispatch;
pub mod error;
pub mod file;
pub mod lint;
pub mod paired;
pub mod policy;
pub mod reader;
pub mod record;
pub mod validators;
mod util;

pub use crate::error::{ConfigError, Diagnostic, ErrorKind, FileContext, LintError, Location};
pub use crate::file::FastqFile;
pub use crate::lint::{LintSummary, lint_paired, lint_single};
pub use crate::paired::{PairedFastqFiles, UNEQUAL_RECORD_COUNTS};
pub use crate::policy::{LintMode, LintOptions, ValidationLevel};
pub use crate::reader::RecordReader;
pub use crate::record::{FastqRead, Interleave};
