//! Validators that look at one read at a time.

use super::Validator;
use crate::error::ErrorKind;
use crate::policy::ValidationLevel;
use crate::record::FastqRead;

use growable_bloom_filter::GrowableBloom;
use std::collections::HashMap;

const FALSE_POSITIVE_PROBABILITY: f64 = 0.0001;
const INITIAL_CAPACITY: usize = 1_000_000;

/// A check over a single read. `Err` carries the human-readable reason.
pub trait SingleReadValidator: Validator {
    fn validate(&self, read: &FastqRead) -> Result<(), String>;
}

/// [S001] (minimum) The plus line must be exactly `+`.
pub struct PluslineValidator;

impl Validator for PluslineValidator {
    fn code(&self) -> &'static str {
        "S001"
    }
    fn name(&self) -> &'static str {
        "PluslineValidator"
    }
    fn level(&self) -> ValidationLevel {
        ValidationLevel::Minimum
    }
    fn kind(&self) -> ErrorKind {
        ErrorKind::Structural
    }
}

impl SingleReadValidator for PluslineValidator {
    fn validate(&self, read: &FastqRead) -> Result<(), String> {
        match read.plusline() {
            Some("+") => Ok(()),
            _ => Err("The plusline is not formatted correctly. It's possible this is a \
                      FastA file or that the reads are not correctly formed."
                .to_string()),
        }
    }
}

/// [S004] (minimum) All four lines of the record must be present and non-empty.
pub struct CompleteReadValidator;

impl Validator for CompleteReadValidator {
    fn code(&self) -> &'static str {
        "S004"
    }
    fn name(&self) -> &'static str {
        "CompleteReadValidator"
    }
    fn level(&self) -> ValidationLevel {
        ValidationLevel::Minimum
    }
    fn kind(&self) -> ErrorKind {
        ErrorKind::Structural
    }
}

impl SingleReadValidator for CompleteReadValidator {
    fn validate(&self, read: &FastqRead) -> Result<(), String> {
        let present = |f: Option<&str>| f.is_some_and(|s| !s.is_empty());
        if read.name().is_empty()
            || !present(read.sequence())
            || !present(read.plusline())
            || !present(read.quality())
        {
            return Err("Read is not complete.".to_string());
        }
        Ok(())
    }
}

/// [S002] (low) Sequence bases must be in `ACGTN`, either case.
pub struct AlphabetValidator;

impl Validator for AlphabetValidator {
    fn code(&self) -> &'static str {
        "S002"
    }
    fn name(&self) -> &'static str {
        "AlphabetValidator"
    }
    fn level(&self) -> ValidationLevel {
        ValidationLevel::Low
    }
    fn kind(&self) -> ErrorKind {
        ErrorKind::Content
    }
}

impl SingleReadValidator for AlphabetValidator {
    fn validate(&self, read: &FastqRead) -> Result<(), String> {
        let seq = read.sequence().unwrap_or("");
        if seq.bytes().all(|b| b"ACGTNacgtn".contains(&b)) {
            Ok(())
        } else {
            Err(format!("Non-ACGTN base found in sequence {seq}"))
        }
    }
}

/// [S003] (high) Read names must start with `@`.
pub struct ReadnameValidator;

impl Validator for ReadnameValidator {
    fn code(&self) -> &'static str {
        "S003"
    }
    fn name(&self) -> &'static str {
        "ReadnameValidator"
    }
    fn level(&self) -> ValidationLevel {
        ValidationLevel::High
    }
    fn kind(&self) -> ErrorKind {
        ErrorKind::Content
    }
}

impl SingleReadValidator for ReadnameValidator {
    fn validate(&self, read: &FastqRead) -> Result<(), String> {
        if read.name().starts_with('@') {
            Ok(())
        } else {
            Err("Read name must start with @".to_string())
        }
    }
}

/// [S005] (high) Sequence and quality lines must have the same length.
pub struct ConsistentSeqQualValidator;

impl Validator for ConsistentSeqQualValidator {
    fn code(&self) -> &'static str {
        "S005"
    }
    fn name(&self) -> &'static str {
        "ConsistentSeqQualValidator"
    }
    fn level(&self) -> ValidationLevel {
        ValidationLevel::High
    }
    fn kind(&self) -> ErrorKind {
        ErrorKind::Structural
    }
}

impl SingleReadValidator for ConsistentSeqQualValidator {
    fn validate(&self, read: &FastqRead) -> Result<(), String> {
        let len = |f: Option<&str>| f.map_or(0, |s| s.chars().count());
        let (seq, qual) = (len(read.sequence()), len(read.quality()));
        if seq == qual {
            Ok(())
        } else {
            Err(format!(
                "Sequence and quality lengths do not match (sequence {seq}, quality {qual})"
            ))
        }
    }
}

/// [S006] (low) Quality scores must be printable ASCII, `!` through `~`.
pub struct QualityStringValidator;

impl Validator for QualityStringValidator {
    fn code(&self) -> &'static str {
        "S006"
    }
    fn name(&self) -> &'static str {
        "QualityStringValidator"
    }
    fn level(&self) -> ValidationLevel {
        ValidationLevel::Low
    }
    fn kind(&self) -> ErrorKind {
        ErrorKind::Content
    }
}

impl SingleReadValidator for QualityStringValidator {
    fn validate(&self, read: &FastqRead) -> Result<(), String> {
        let qual = read.quality().unwrap_or("");
        match qual.chars().find(|c| !('!'..='~').contains(c)) {
            None => Ok(()),
            Some(c) => Err(format!("Invalid character {c:?} in quality string {qual}")),
        }
    }
}

/// [S007] (high) Read names must be unique within a file.
///
/// Needs two passes over the file, so it is not part of a chain. The first
/// pass [`insert`](Self::insert)s every name into a growable Bloom filter and
/// keeps only the names the filter has probably seen before. The second pass
/// [`validate`](Self::validate)s every read again and fails on the second
/// occurrence of a name among those candidates.
pub struct DuplicateNameValidator {
    filter: GrowableBloom,
    possible_duplicates: HashMap<String, u8>,
}

impl DuplicateNameValidator {
    pub const CODE: &'static str = "S007";

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the check runs at `level` with `disabled` codes turned off.
    pub fn is_enabled(level: ValidationLevel, disabled: &[String]) -> bool {
        ValidationLevel::High <= level && !disabled.iter().any(|c| c == Self::CODE)
    }

    /// First pass: adds the read's name, remembering it if already seen.
    pub fn insert(&mut self, read: &FastqRead) {
        let name = read.name();
        if self.filter.contains(&name) {
            self.possible_duplicates.insert(name.to_string(), 0);
        } else {
            self.filter.insert(&name);
        }
    }

    /// No candidate duplicates; the second pass can be skipped.
    pub fn is_empty(&self) -> bool {
        self.possible_duplicates.is_empty()
    }

    /// Second pass: fails every occurrence of a candidate name after the first.
    pub fn validate(&mut self, read: &FastqRead) -> Result<(), String> {
        if let Some(seen) = self.possible_duplicates.get_mut(read.name()) {
            if *seen >= 1 {
                return Err(format!("Duplicate read name: {}", read.name()));
            }
            *seen += 1;
        }
        Ok(())
    }
}

impl Default for DuplicateNameValidator {
    fn default() -> Self {
        Self {
            filter: GrowableBloom::new(FALSE_POSITIVE_PROBABILITY, INITIAL_CAPACITY),
            possible_duplicates: HashMap::new(),
        }
    }
}

impl Validator for DuplicateNameValidator {
    fn code(&self) -> &'static str {
        Self::CODE
    }
    fn name(&self) -> &'static str {
        "DuplicateNameValidator"
    }
    fn level(&self) -> ValidationLevel {
        ValidationLevel::High
    }
    fn kind(&self) -> ErrorKind {
        ErrorKind::Content
    }
}
