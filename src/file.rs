use crate::dispatch::Dispatcher;
use crate::error::{Diagnostic, LintError, Location};
use crate::policy::LintOptions;
use crate::reader::RecordReader;
use crate::record::FastqRead;
use crate::validators::SingleReadChain;

use std::io::{BufRead, Write};
use std::path::Path;

/// Outcome of advancing a [`ReadCursor`] by one record.
pub(crate) enum Step {
    Exhausted,
    /// The read plus the first single-read failure, not yet dispatched.
    Read(FastqRead, Option<Diagnostic>),
}

/// Reader plus single-read chain, without a dispatch policy. Shared by
/// [`FastqFile`] and the paired cursor, which dispatches on behalf of both mates.
pub(crate) struct ReadCursor {
    reader: RecordReader,
    chain: SingleReadChain,
    records: u64,
}

impl ReadCursor {
    pub(crate) fn new(reader: RecordReader, opts: &LintOptions) -> Result<Self, LintError> {
        let chain =
            SingleReadChain::new(opts.single_read_validation_level, &opts.disabled_validators)?;
        Ok(Self {
            reader,
            chain,
            records: 0,
        })
    }

    pub(crate) fn step(&mut self) -> Result<Step, LintError> {
        let lines = self.reader.getlines::<4>()?;

        // A lone blank line at the end of the file is not a record.
        if matches!(&lines, [Some(name), None, None, None] if name.is_empty()) {
            return Ok(Step::Exhausted);
        }
        let Some(read) = FastqRead::from_lines(lines) else {
            return Ok(Step::Exhausted);
        };
        self.records += 1;

        let diag = self
            .chain
            .first_failure(&read)
            .map(|(v, description)| Diagnostic {
                kind: v.kind(),
                code: v.code(),
                validator: v.name(),
                description,
                read_name: read.name().to_string(),
                location: Location::Single(self.reader.ctx()),
            });
        Ok(Step::Read(read, diag))
    }

    pub(crate) fn reader(&self) -> &RecordReader {
        &self.reader
    }

    pub(crate) fn chain(&self) -> &SingleReadChain {
        &self.chain
    }

    pub(crate) fn records(&self) -> u64 {
        self.records
    }
}

/// Validating iterator over the reads of one FastQ file.
///
/// In error mode the first failure is yielded as `Err` and iteration ends.
/// In report mode failures go to the report sink and every read is yielded.
pub struct FastqFile {
    cursor: ReadCursor,
    dispatcher: Dispatcher,
    done: bool,
}

impl FastqFile {
    pub fn from_path<P: AsRef<Path>>(path: P, opts: &LintOptions) -> Result<Self, LintError> {
        Self::with_reader(RecordReader::from_path(path)?, opts)
    }

    /// Wrap an arbitrary `BufRead`; `name` is used in diagnostics.
    pub fn from_bufread<R: BufRead + Send + 'static>(
        reader: R,
        name: impl Into<String>,
        opts: &LintOptions,
    ) -> Result<Self, LintError> {
        Self::with_reader(RecordReader::from_bufread(reader, name), opts)
    }

    fn with_reader(reader: RecordReader, opts: &LintOptions) -> Result<Self, LintError> {
        log::info!(
            "validating {} (single-read level {}, {} mode)",
            reader.name(),
            opts.single_read_validation_level,
            opts.lint_mode
        );
        Ok(Self {
            cursor: ReadCursor::new(reader, opts)?,
            dispatcher: Dispatcher::new(opts.lint_mode),
            done: false,
        })
    }

    /// Redirect report-mode output (stdout by default).
    pub fn with_sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.dispatcher.set_sink(sink);
        self
    }

    /// Iterator-style `next` read.
    pub fn next(&mut self) -> Option<Result<FastqRead, LintError>> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(read)) => Some(Ok(read)),
            Ok(None) => {
                self.done = true;
                log::info!(
                    "read {} records from {}",
                    self.cursor.records(),
                    self.name()
                );
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn advance(&mut self) -> Result<Option<FastqRead>, LintError> {
        match self.cursor.step()? {
            Step::Exhausted => {
                self.dispatcher.flush()?;
                Ok(None)
            }
            Step::Read(read, diag) => {
                self.dispatcher.dispatch_opt(diag)?;
                Ok(Some(read))
            }
        }
    }

    /// `(code, name)` of the active single-read validators, in run order.
    pub fn validators(&self) -> Vec<(&'static str, &'static str)> {
        self.cursor.chain().describe()
    }

    pub fn name(&self) -> &str {
        self.cursor.reader().name()
    }

    pub fn line_num(&self) -> u64 {
        self.cursor.reader().line_num()
    }

    /// Records read so far.
    pub fn records(&self) -> u64 {
        self.cursor.records()
    }

    /// Diagnostics written to the report sink so far.
    pub fn reported(&self) -> u64 {
        self.dispatcher.reported()
    }

    /// Releases the file handle, keeping the report sink for a later pass.
    pub(crate) fn into_dispatcher(self) -> Dispatcher {
        self.dispatcher
    }

    /// Releases the file handle. Dropping does the same.
    pub fn close(self) {}
}

impl Iterator for FastqFile {
    type Item = Result<FastqRead, LintError>;
    fn next(&mut self) -> Option<Self::Item> {
        FastqFile::next(self)
    }
}
