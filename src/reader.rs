use crate::error::{FileContext, LintError};
use crate::util::{display_name, open_file};

use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Line-oriented reader over one FastQ file, streaming fixed-size blocks.
pub struct RecordReader {
    name: String,
    rdr: Box<dyn BufRead + Send>,
    line_num: u64,
}

impl RecordReader {
    /// Open from a file path. Diagnostics are attributed to the basename.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LintError> {
        let path = path.as_ref();
        let name = display_name(path);
        let f = open_file(path).map_err(|e| {
            LintError::io_err(
                e,
                FileContext {
                    filename: name.clone(),
                    line_num: 0,
                },
            )
        })?;

        log::debug!("opened {}", path.display());

        Ok(Self {
            name,
            rdr: Box::new(BufReader::with_capacity(256 * 1024, f)),
            line_num: 0,
        })
    }

    /// Wrap an arbitrary `BufRead` (stdin, in-memory data, ...).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rdr: Box::new(reader),
            line_num: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    /// Returns exactly `N` right-trimmed lines. Slots past the end of the
    /// stream are `None`; only lines actually consumed advance the counter.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a corrupt
    /// base or quality value surfaces as a validator failure on its record.
    pub fn getlines<const N: usize>(&mut self) -> Result<[Option<String>; N], LintError> {
        let mut lines: [Option<String>; N] = std::array::from_fn(|_| None);
        for slot in lines.iter_mut() {
            match self.read_line() {
                Ok(Some(line)) => *slot = Some(line),
                Ok(None) => break,
                // The failed line was never consumed; attribute it anyway.
                Err(e) => return Err(LintError::io_err(e, self.ctx_at(self.line_num + 1))),
            }
        }
        Ok(lines)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::with_capacity(256);
        let n = self.rdr.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_num += 1;
        let trimmed = buf.trim_ascii_end().len();
        buf.truncate(trimmed);
        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => {
                log::debug!("{}:{}: invalid UTF-8 replaced", self.name, self.line_num);
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(line))
    }

    /// Snapshot of the current position for error attribution.
    #[inline]
    pub fn ctx(&self) -> FileContext {
        self.ctx_at(self.line_num)
    }

    fn ctx_at(&self, line_num: u64) -> FileContext {
        FileContext {
            filename: self.name.clone(),
            line_num,
        }
    }
}
