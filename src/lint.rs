//! Run a cursor to completion and summarize the outcome.
//!
//! These drivers own the file paths, so they also run the duplicate name
//! check (S007), which re-reads a file once the first pass is done.

use crate::dispatch::Dispatcher;
use crate::error::{Diagnostic, LintError, Location};
use crate::file::FastqFile;
use crate::paired::PairedFastqFiles;
use crate::policy::LintOptions;
use crate::reader::RecordReader;
use crate::record::FastqRead;
use crate::validators::{DuplicateNameValidator, Validator};

use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintSummary {
    /// Reads (single-file) or read pairs (paired) yielded.
    pub records: u64,
    /// Diagnostics written in report mode.
    pub diagnostics: u64,
}

impl LintSummary {
    pub fn is_clean(&self) -> bool {
        self.diagnostics == 0
    }
}

/// Validate one file. In error mode the first failure is returned as `Err`.
pub fn lint_single<P, W>(path: P, opts: &LintOptions, sink: W) -> Result<LintSummary, LintError>
where
    P: AsRef<Path>,
    W: Write + Send + 'static,
{
    let path = path.as_ref();
    let mut file = FastqFile::from_path(path, opts)?.with_sink(sink);
    let mut duplicates = duplicate_name_validator(opts);
    while let Some(read) = file.next() {
        let read = read?;
        if let Some(v) = duplicates.as_mut() {
            v.insert(&read);
        }
    }

    let records = file.records();
    let mut dispatcher = file.into_dispatcher();
    if let Some(v) = duplicates {
        check_duplicate_names(path, v, &mut dispatcher)?;
    }
    Ok(LintSummary {
        records,
        diagnostics: dispatcher.reported(),
    })
}

/// Validate a pair of mate files. In error mode the first failure is returned as `Err`.
///
/// Mates share their names, so duplicate names are only checked in `read_one`.
pub fn lint_paired<P, Q, W>(
    read_one: P,
    read_two: Q,
    opts: &LintOptions,
    sink: W,
) -> Result<LintSummary, LintError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    W: Write + Send + 'static,
{
    let read_one = read_one.as_ref();
    let mut pair = PairedFastqFiles::from_paths(read_one, read_two, opts)?.with_sink(sink);
    let mut duplicates = duplicate_name_validator(opts);
    while let Some(reads) = pair.next() {
        let (one, _) = reads?;
        if let Some(v) = duplicates.as_mut() {
            v.insert(&one);
        }
    }

    let records = pair.pair_index();
    let mut dispatcher = pair.into_dispatcher();
    if let Some(v) = duplicates {
        check_duplicate_names(read_one, v, &mut dispatcher)?;
    }
    Ok(LintSummary {
        records,
        diagnostics: dispatcher.reported(),
    })
}

fn duplicate_name_validator(opts: &LintOptions) -> Option<DuplicateNameValidator> {
    let enabled = DuplicateNameValidator::is_enabled(
        opts.single_read_validation_level,
        &opts.disabled_validators,
    );
    if !enabled {
        log::debug!("enabled special validators: []");
        return None;
    }
    let v = DuplicateNameValidator::new();
    log::debug!("enabled special validators: [[{}] {}]", v.code(), v.name());
    Some(v)
}

/// Second pass of S007: re-read `path` and dispatch every repeated name.
fn check_duplicate_names(
    path: &Path,
    mut validator: DuplicateNameValidator,
    dispatcher: &mut Dispatcher,
) -> Result<(), LintError> {
    if validator.is_empty() {
        log::debug!("no possible duplicate names in {}", path.display());
        return Ok(());
    }

    let mut reader = RecordReader::from_path(path)?;
    log::info!("checking {} for duplicate read names", reader.name());
    while let Some(read) = FastqRead::from_lines(reader.getlines::<4>()?) {
        if let Err(description) = validator.validate(&read) {
            dispatcher.dispatch(Diagnostic {
                kind: validator.kind(),
                code: validator.code(),
                validator: validator.name(),
                description,
                read_name: read.name().to_string(),
                location: Location::Single(reader.ctx()),
            })?;
        }
    }
    dispatcher.flush()
}
