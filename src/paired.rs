use crate::dispatch::Dispatcher;
use crate::error::{Diagnostic, ErrorKind, LintError, Location};
use crate::file::{ReadCursor, Step};
use crate::policy::LintOptions;
use crate::reader::RecordReader;
use crate::record::FastqRead;
use crate::validators::PairedReadChain;

use std::io::{BufRead, Write};
use std::path::Path;

/// Code reported when one mate file runs out of records before the other.
/// This check is not level-filtered and cannot be disabled.
pub const UNEQUAL_RECORD_COUNTS: &str = "P002";

/// Validating iterator over two mate files read in lock-step.
///
/// Each call advances both files by exactly one record. Single-read failures
/// are attributed to their own file and line; paired failures carry the pair
/// index and both files' positions.
pub struct PairedFastqFiles {
    read_one: ReadCursor,
    read_two: ReadCursor,
    chain: PairedReadChain,
    dispatcher: Dispatcher,
    pair_index: u64,
    done: bool,
}

impl PairedFastqFiles {
    pub fn from_paths<P, Q>(
        read_one: P,
        read_two: Q,
        opts: &LintOptions,
    ) -> Result<Self, LintError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self::with_readers(
            RecordReader::from_path(read_one)?,
            RecordReader::from_path(read_two)?,
            opts,
        )
    }

    /// Wrap two arbitrary `BufRead`s; the names are used in diagnostics.
    pub fn from_bufreads<R1, R2>(
        read_one: R1,
        read_one_name: impl Into<String>,
        read_two: R2,
        read_two_name: impl Into<String>,
        opts: &LintOptions,
    ) -> Result<Self, LintError>
    where
        R1: BufRead + Send + 'static,
        R2: BufRead + Send + 'static,
    {
        Self::with_readers(
            RecordReader::from_bufread(read_one, read_one_name),
            RecordReader::from_bufread(read_two, read_two_name),
            opts,
        )
    }

    fn with_readers(
        one: RecordReader,
        two: RecordReader,
        opts: &LintOptions,
    ) -> Result<Self, LintError> {
        log::info!(
            "validating pair {} / {} (single-read level {}, paired-read level {}, {} mode)",
            one.name(),
            two.name(),
            opts.single_read_validation_level,
            opts.paired_read_validation_level,
            opts.lint_mode
        );
        let chain =
            PairedReadChain::new(opts.paired_read_validation_level, &opts.disabled_validators)?;
        Ok(Self {
            read_one: ReadCursor::new(one, opts)?,
            read_two: ReadCursor::new(two, opts)?,
            chain,
            dispatcher: Dispatcher::new(opts.lint_mode),
            pair_index: 0,
            done: false,
        })
    }

    /// Redirect report-mode output (stdout by default).
    pub fn with_sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.dispatcher.set_sink(sink);
        self
    }

    /// Iterator-style `next` pair.
    pub fn next(&mut self) -> Option<Result<(FastqRead, FastqRead), LintError>> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(pair)) => {
                self.pair_index += 1;
                Some(Ok(pair))
            }
            Ok(None) => {
                self.done = true;
                log::info!(
                    "read {} pairs from {} / {}",
                    self.pair_index,
                    self.read_one.reader().name(),
                    self.read_two.reader().name()
                );
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn advance(&mut self) -> Result<Option<(FastqRead, FastqRead)>, LintError> {
        // Both mates are read before anything is dispatched.
        let one = self.read_one.step()?;
        let two = self.read_two.step()?;

        match (one, two) {
            (Step::Exhausted, Step::Exhausted) => {
                self.dispatcher.flush()?;
                Ok(None)
            }
            (Step::Read(read, diag), Step::Exhausted)
            | (Step::Exhausted, Step::Read(read, diag)) => {
                self.dispatcher.dispatch_opt(diag)?;
                let d = self.unequal_record_counts(&read);
                self.dispatcher.dispatch(d)?;
                self.dispatcher.flush()?;
                Ok(None)
            }
            (Step::Read(r1, d1), Step::Read(r2, d2)) => {
                self.dispatcher.dispatch_opt(d1)?;
                self.dispatcher.dispatch_opt(d2)?;
                let diag = self
                    .chain
                    .first_failure(&r1, &r2)
                    .map(|(v, description)| Diagnostic {
                        kind: v.kind(),
                        code: v.code(),
                        validator: v.name(),
                        description,
                        read_name: r1.name().to_string(),
                        location: self.location(),
                    });
                self.dispatcher.dispatch_opt(diag)?;
                Ok(Some((r1, r2)))
            }
        }
    }

    fn unequal_record_counts(&self, extra: &FastqRead) -> Diagnostic {
        let (longer, shorter) = if self.read_one.records() > self.read_two.records() {
            (&self.read_one, &self.read_two)
        } else {
            (&self.read_two, &self.read_one)
        };
        Diagnostic {
            kind: ErrorKind::PairMismatch,
            code: UNEQUAL_RECORD_COUNTS,
            validator: "RecordCountValidator",
            description: format!(
                "Unequal record counts: {} has more records than {}.",
                longer.reader().name(),
                shorter.reader().name()
            ),
            read_name: extra.name().to_string(),
            location: self.location(),
        }
    }

    fn location(&self) -> Location {
        Location::Paired {
            pair_index: self.pair_index,
            read_one: self.read_one.reader().ctx(),
            read_two: self.read_two.reader().ctx(),
        }
    }

    /// `(code, name)` of the active single-read and paired-read validators.
    pub fn validators(
        &self,
    ) -> (
        Vec<(&'static str, &'static str)>,
        Vec<(&'static str, &'static str)>,
    ) {
        (self.read_one.chain().describe(), self.chain.describe())
    }

    /// Zero-based index of the next pair; equals the number of pairs yielded.
    pub fn pair_index(&self) -> u64 {
        self.pair_index
    }

    /// Diagnostics written to the report sink so far.
    pub fn reported(&self) -> u64 {
        self.dispatcher.reported()
    }

    /// Releases both file handles, keeping the report sink for a later pass.
    pub(crate) fn into_dispatcher(self) -> Dispatcher {
        self.dispatcher
    }

    /// Releases both file handles. Dropping does the same.
    pub fn close(self) {}
}

impl Iterator for PairedFastqFiles {
    type Item = Result<(FastqRead, FastqRead), LintError>;
    fn next(&mut self) -> Option<Self::Item> {
        PairedFastqFiles::next(self)
    }
}
