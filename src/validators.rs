//! Level-filtered validator chains.
//!
//! Validators live in a static, ordered registry per category. A chain is
//! built once per cursor by keeping every validator whose level is at or
//! below the configured threshold, minus any explicitly disabled codes.
//! Chains run in registry order and stop at the first failure.
//!
//! The duplicate name check (S007) needs two passes over a file and is run by
//! the path-based drivers in [`crate::lint`] instead of a chain.

pub mod paired;
pub mod single;

use crate::error::{ConfigError, ErrorKind};
use crate::policy::ValidationLevel;
use crate::record::FastqRead;

pub use self::paired::{PairedReadValidator, PairedReadnameValidator};
pub use self::single::{
    AlphabetValidator, CompleteReadValidator, ConsistentSeqQualValidator, DuplicateNameValidator,
    PluslineValidator, QualityStringValidator, ReadnameValidator, SingleReadValidator,
};

/// Identity shared by every validator.
pub trait Validator: Send + Sync {
    fn code(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn level(&self) -> ValidationLevel;
    fn kind(&self) -> ErrorKind;
}

/// Every single-read validator, in the order the chain runs them.
pub fn single_read_registry() -> Vec<Box<dyn SingleReadValidator>> {
    vec![
        Box::new(PluslineValidator),
        Box::new(CompleteReadValidator),
        Box::new(AlphabetValidator),
        Box::new(ReadnameValidator),
        Box::new(ConsistentSeqQualValidator),
        Box::new(QualityStringValidator),
    ]
}

/// Every paired-read validator, in the order the chain runs them.
pub fn paired_read_registry() -> Vec<Box<dyn PairedReadValidator>> {
    vec![Box::new(PairedReadnameValidator)]
}

/// Rejects codes that name no registered validator.
pub fn check_disabled(disabled: &[String]) -> Result<(), ConfigError> {
    let singles = single_read_registry();
    let paireds = paired_read_registry();
    for code in disabled {
        let known = singles.iter().any(|v| v.code() == code)
            || paireds.iter().any(|v| v.code() == code)
            || code == DuplicateNameValidator::CODE;
        if !known {
            return Err(ConfigError::UnknownValidator(code.clone()));
        }
    }
    Ok(())
}

/// An ordered, filtered set of validators.
pub struct Chain<V: ?Sized> {
    validators: Vec<Box<V>>,
}

impl<V: Validator + ?Sized> Chain<V> {
    fn filter(all: Vec<Box<V>>, level: ValidationLevel, disabled: &[String]) -> Self {
        let validators: Vec<Box<V>> = all
            .into_iter()
            .filter(|v| v.level() <= level)
            .filter(|v| !disabled.iter().any(|c| c == v.code()))
            .collect();
        log::debug!(
            "enabled validators at level {level}: {:?}",
            validators
                .iter()
                .map(|v| format!("[{}] {}", v.code(), v.name()))
                .collect::<Vec<_>>()
        );
        Self { validators }
    }

    /// `(code, name)` of every active validator, in run order.
    pub fn describe(&self) -> Vec<(&'static str, &'static str)> {
        self.validators.iter().map(|v| (v.code(), v.name())).collect()
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.code()).collect()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

pub type SingleReadChain = Chain<dyn SingleReadValidator>;
pub type PairedReadChain = Chain<dyn PairedReadValidator>;

impl Chain<dyn SingleReadValidator> {
    pub fn new(level: ValidationLevel, disabled: &[String]) -> Result<Self, ConfigError> {
        check_disabled(disabled)?;
        Ok(Self::filter(single_read_registry(), level, disabled))
    }

    /// First failing validator for `read`, if any.
    pub fn first_failure(
        &self,
        read: &FastqRead,
    ) -> Option<(&dyn SingleReadValidator, String)> {
        self.validators
            .iter()
            .find_map(|v| v.validate(read).err().map(|d| (&**v, d)))
    }
}

impl Chain<dyn PairedReadValidator> {
    pub fn new(level: ValidationLevel, disabled: &[String]) -> Result<Self, ConfigError> {
        check_disabled(disabled)?;
        Ok(Self::filter(paired_read_registry(), level, disabled))
    }

    /// First failing validator for the pair, if any.
    pub fn first_failure(
        &self,
        one: &FastqRead,
        two: &FastqRead,
    ) -> Option<(&dyn PairedReadValidator, String)> {
        self.validators
            .iter()
            .find_map(|v| v.validate(one, two).err().map(|d| (&**v, d)))
    }
}
