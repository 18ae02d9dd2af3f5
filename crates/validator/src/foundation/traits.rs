//! Core traits for the validation system

use crate::foundation::{AsRaw, Raw, ValidationError};

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The trait every field validator implements.
///
/// Implementors provide [`validate_raw`](Validate::validate_raw) over the
/// borrowed [`Raw`] view; callers use [`validate`](Validate::validate), which
/// accepts strings, numbers, lists and `serde_json::Value` alike. The trait
/// stays object-safe so rules can be stored as `Box<dyn Validate>`.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::catalogue::{FieldKind, match_rule};
/// use fieldcheck_validator::foundation::Validate;
///
/// let entry = match_rule(FieldKind::PostalCode);
/// assert!(entry.validate("100000").is_ok());
/// assert!(entry.validate("012345").is_err());
/// ```
pub trait Validate {
    /// Validates a raw field value.
    ///
    /// * `Ok(())` if validation succeeds
    /// * `Err(ValidationError)` carrying exactly one message otherwise
    fn validate_raw(&self, input: Raw<'_>) -> Result<(), ValidationError>;

    /// Validates any value that can be viewed as a field value.
    fn validate<T>(&self, input: &T) -> Result<(), ValidationError>
    where
        Self: Sized,
        T: AsRaw + ?Sized,
    {
        self.validate_raw(input.as_raw())
    }

    /// Runs the validator and reduces the result to a pass/fail flag.
    fn is_valid<T>(&self, input: &T) -> bool
    where
        Self: Sized,
        T: AsRaw + ?Sized,
    {
        self.validate(input).is_ok()
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    fn validate_raw(&self, input: Raw<'_>) -> Result<(), ValidationError> {
        (**self).validate_raw(input)
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    fn validate_raw(&self, input: Raw<'_>) -> Result<(), ValidationError> {
        (**self).validate_raw(input)
    }
}

// ============================================================================
// TESTS
// ============================================================================
