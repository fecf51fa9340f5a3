use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

/// Position of one file at the moment an error was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    /// Display name (basename) of the file.
    pub filename: String,
    /// Last line consumed from the file, 1-based.
    pub line_num: u64,
}

impl fmt::Display for FileContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line_num)
    }
}

/// Where a diagnostic applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Single(FileContext),
    Paired {
        /// Zero-based ordinal of the pair within the traversal.
        pair_index: u64,
        read_one: FileContext,
        read_two: FileContext,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed record layout (plus line, missing fields, length mismatch).
    Structural,
    /// Bad content in an otherwise well-laid-out record.
    Content,
    /// Mates disagree with each other.
    PairMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Structural => "structural error",
            Self::Content => "content error",
            Self::PairMismatch => "pair mismatch error",
        })
    }
}

/// A single validator failure with full attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub validator: &'static str,
    pub description: String,
    pub read_name: String,
    pub location: Location,
}

impl Diagnostic {
    /// Writes the report-mode rendering: one `file:code:line: description` line,
    /// or one line per mate file (keyed by pair index) for paired failures.
    pub fn write_report<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        match &self.location {
            Location::Single(ctx) => writeln!(
                w,
                "{}:{}:{}: {}",
                ctx.filename, self.code, ctx.line_num, self.description
            ),
            Location::Paired {
                pair_index,
                read_one,
                read_two,
            } => {
                for ctx in [read_one, read_two] {
                    writeln!(
                        w,
                        "{}:{}:{}: {}",
                        ctx.filename, self.code, pair_index, self.description
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Location::Single(ctx) => write!(
                f,
                "read '{}' failed validation in {} at line {} ({}): [{}] {}",
                self.read_name, ctx.filename, ctx.line_num, self.kind, self.code, self.description
            ),
            Location::Paired {
                pair_index,
                read_one,
                read_two,
            } => write!(
                f,
                "read pair {} ('{}') failed validation in {} and {} ({}): [{}] {}",
                pair_index,
                self.read_name,
                read_one,
                read_two,
                self.kind,
                self.code,
                self.description
            ),
        }
    }
}

impl std::error::Error for Diagnostic {}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown validation level: {0:?} (expected minimum, low or high)")]
    UnknownValidationLevel(String),
    #[error("unknown lint mode: {0:?} (expected error or report)")]
    UnknownLintMode(String),
    #[error("unknown validator code: {0:?}")]
    UnknownValidator(String),
}

#[derive(Debug, Error)]
pub enum LintError {
    #[error("I/O error at {ctx}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: FileContext,
    },
    #[error("failed to write report: {0}")]
    Report(#[source] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(Box<Diagnostic>),
}

impl LintError {
    pub(crate) fn io_err(source: io::Error, ctx: FileContext) -> Self {
        Self::Io { source, ctx }
    }

    /// The diagnostic, if this is a validation failure.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Validation(d) => Some(d.as_ref()),
            _ => None,
        }
    }
}

impl From<Diagnostic> for LintError {
    fn from(d: Diagnostic) -> Self {
        Self::Validation(Box::new(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(filename: &str, line_num: u64) -> FileContext {
        FileContext {
            filename: filename.to_string(),
            line_num,
        }
    }

    #[test]
    fn single_report_line() {
        let d = Diagnostic {
            kind: ErrorKind::Content,
            code: "S002",
            validator: "AlphabetValidator",
            description: "Non-ACGTN base found in sequence ACGTX".to_string(),
            read_name: "@r1".to_string(),
            location: Location::Single(ctx("R1.fastq", 8)),
        };
        let mut out = Vec::new();
        d.write_report(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "R1.fastq:S002:8: Non-ACGTN base found in sequence ACGTX\n"
        );
        assert_eq!(
            d.to_string(),
            "read '@r1' failed validation in R1.fastq at line 8 (content error): \
             [S002] Non-ACGTN base found in sequence ACGTX"
        );
    }

    #[test]
    fn paired_report_writes_one_line_per_mate() {
        let d = Diagnostic {
            kind: ErrorKind::PairMismatch,
            code: "P001",
            validator: "PairedReadnameValidator",
            description: "Read names do not match.".to_string(),
            read_name: "@READ1".to_string(),
            location: Location::Paired {
                pair_index: 3,
                read_one: ctx("R1.fastq", 16),
                read_two: ctx("R2.fastq", 16),
            },
        };
        let mut out = Vec::new();
        d.write_report(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "R1.fastq:P001:3: Read names do not match.\nR2.fastq:P001:3: Read names do not match.\n"
        );
    }

    #[test]
    fn validation_error_exposes_diagnostic() {
        let d = Diagnostic {
            kind: ErrorKind::Structural,
            code: "S001",
            validator: "PluslineValidator",
            description: "bad".to_string(),
            read_name: "@r".to_string(),
            location: Location::Single(ctx("a.fq", 4)),
        };
        let err = LintError::from(d.clone());
        assert_eq!(err.diagnostic(), Some(&d));
        assert_eq!(err.to_string(), d.to_string());

        let err = LintError::from(ConfigError::UnknownLintMode("x".into()));
        assert!(err.diagnostic().is_none());
    }
}
