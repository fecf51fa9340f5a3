//! Validators that compare the two mates of a pair.

use super::Validator;
use crate::error::ErrorKind;
use crate::policy::ValidationLevel;
use crate::record::FastqRead;

/// A check over a mate pair. `Err` carries the human-readable reason.
pub trait PairedReadValidator: Validator {
    fn validate(&self, one: &FastqRead, two: &FastqRead) -> Result<(), String>;
}

/// [P001] (low) Mates must share a name once interleave markers are stripped.
pub struct PairedReadnameValidator;

impl Validator for PairedReadnameValidator {
    fn code(&self) -> &'static str {
        "P001"
    }
    fn name(&self) -> &'static str {
        "PairedReadnameValidator"
    }
    fn level(&self) -> ValidationLevel {
        ValidationLevel::Low
    }
    fn kind(&self) -> ErrorKind {
        ErrorKind::PairMismatch
    }
}

impl PairedReadValidator for PairedReadnameValidator {
    fn validate(&self, one: &FastqRead, two: &FastqRead) -> Result<(), String> {
        if one.name() == two.name() {
            Ok(())
        } else {
            Err("Read names do not match.".to_string())
        }
    }
}
