//! Field rules and the completion-callback protocol.
//!
//! Rules exist in two forms:
//!
//! - plain functions in [`scalar`], [`list`] and [`range`] returning a
//!   [`ValidationResult`];
//! - [`FieldRule`], which dispatches by [`FieldKind`] and reports through a
//!   completion callback, the way a form layer invokes its validators.
//!
//! # Callback protocol
//!
//! `complete` is called exactly once, synchronously, before `run` returns:
//! with `None` on success and `Some(error)` on failure.
//!
//! ```
//! use fieldcheck_validator::catalogue::FieldKind;
//! use fieldcheck_validator::rules::{FieldRule, RuleContext};
//!
//! let ctx = RuleContext::for_field("endPort");
//! let mut verdict = None;
//! FieldRule::new(FieldKind::EndPort).run_paired(&ctx, "80", |e| verdict = Some(e), "8080");
//!
//! let error = verdict.unwrap().unwrap();
//! assert_eq!(error.message, "结束端口必须大于起始端口");
//! assert_eq!(error.field.as_deref(), Some("endPort"));
//! ```

pub mod list;
pub mod range;
pub mod scalar;

use std::borrow::Cow;

use crate::catalogue::FieldKind;
use crate::config::ListLimits;
use crate::foundation::{AsRaw, Raw, Validate, ValidationError, ValidationResult};

// ============================================================================
// RULE CONTEXT
// ============================================================================

/// Caller-side information about the field being validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleContext {
    /// Field path attached to every error raised under this context.
    pub field: Option<Cow<'static, str>>,
}

impl RuleContext {
    /// A context without a field path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_field(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: Some(field.into()),
        }
    }

    fn attach(&self, error: ValidationError) -> ValidationError {
        match &self.field {
            Some(field) => error.with_field(field.clone()),
            None => error,
        }
    }
}

// ============================================================================
// FIELD RULE
// ============================================================================

/// A rule for one field kind, with the list ceilings it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub limits: ListLimits,
}

impl FieldRule {
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            limits: ListLimits::default(),
        }
    }

    /// Applies custom list ceilings.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_limits(mut self, limits: ListLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Checks a value without a companion.
    ///
    /// For "end" kinds this is the same as passing an absent start value.
    pub fn check<T: AsRaw + ?Sized>(&self, value: &T) -> ValidationResult {
        self.dispatch(value.as_raw(), Raw::Missing)
    }

    /// Checks a value against the companion "start" value. Kinds that are not
    /// the end of a range ignore the companion.
    pub fn check_paired<T, C>(&self, value: &T, companion: &C) -> ValidationResult
    where
        T: AsRaw + ?Sized,
        C: AsRaw + ?Sized,
    {
        self.dispatch(value.as_raw(), companion.as_raw())
    }

    /// Validates `value` and reports through `complete`.
    pub fn run<T, F>(&self, ctx: &RuleContext, value: &T, complete: F)
    where
        T: AsRaw + ?Sized,
        F: FnOnce(Option<ValidationError>),
    {
        complete(self.evaluate(ctx, value.as_raw(), Raw::Missing).err());
    }

    /// Validates `value` against `companion` and reports through `complete`.
    pub fn run_paired<T, C, F>(&self, ctx: &RuleContext, value: &T, complete: F, companion: &C)
    where
        T: AsRaw + ?Sized,
        C: AsRaw + ?Sized,
        F: FnOnce(Option<ValidationError>),
    {
        complete(self.evaluate(ctx, value.as_raw(), companion.as_raw()).err());
    }

    fn evaluate(&self, ctx: &RuleContext, value: Raw<'_>, companion: Raw<'_>) -> ValidationResult {
        let field = ctx.field.as_deref().unwrap_or_default();
        match self.dispatch(value, companion) {
            Ok(()) => {
                tracing::trace!(kind = %self.kind, field, "field accepted");
                Ok(())
            }
            Err(error) => {
                tracing::debug!(
                    kind = %self.kind,
                    field,
                    code = %error.code,
                    category = %error.category,
                    "field rejected"
                );
                Err(ctx.attach(error))
            }
        }
    }

    fn dispatch(&self, value: Raw<'_>, companion: Raw<'_>) -> ValidationResult {
        let v = &value;
        match self.kind {
            FieldKind::Name => scalar::name(v),
            FieldKind::Email => scalar::email(v),
            FieldKind::Phone => scalar::phone(v),
            FieldKind::Website => scalar::website(v),
            FieldKind::FolderPath => scalar::folder_path(v),
            FieldKind::SingleIp => scalar::single_ip(v),
            FieldKind::SinglePort => scalar::single_port(v),
            FieldKind::SingleIpPort => scalar::single_ip_port(v),
            FieldKind::IdCard => scalar::id_card(v),
            FieldKind::BankCard => scalar::bank_card(v),
            FieldKind::PostalCode => scalar::postal_code(v),
            FieldKind::MacAddress => scalar::mac_address(v),
            FieldKind::ChineseName => scalar::chinese_name(v),
            FieldKind::EnglishName => scalar::english_name(v),
            FieldKind::StrongPassword => scalar::strong_password(v),
            FieldKind::DigitsOnly => scalar::digits_only(v),
            FieldKind::LettersOnly => scalar::letters_only(v),
            FieldKind::ChineseOnly => scalar::chinese_only(v),
            FieldKind::IpList => list::ip_list_with_limit(v, self.limits.ip_list),
            FieldKind::PortList => list::port_list_with_limit(v, self.limits.port_list),
            FieldKind::FolderPathList => {
                list::folder_path_list_with_limit(v, self.limits.folder_path_list)
            }
            FieldKind::IpPortList => list::ip_port_list_with_limit(v, self.limits.ip_port_list),
            FieldKind::StartValue => range::start_value(v),
            FieldKind::EndValue => range::end_value(v, &companion),
            FieldKind::StartIp => range::start_ip(v),
            FieldKind::EndIp => range::end_ip(v, &companion),
            FieldKind::StartPort => range::start_port(v),
            FieldKind::EndPort => range::end_port(v, &companion),
        }
    }
}

impl From<FieldKind> for FieldRule {
    fn from(kind: FieldKind) -> Self {
        Self::new(kind)
    }
}

impl Validate for FieldRule {
    fn validate_raw(&self, input: Raw<'_>) -> Result<(), ValidationError> {
        self.check(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ErrorCategory;

    fn verdict(rule: FieldRule, value: &str) -> Option<ValidationError> {
        let mut out = None;
        rule.run(&RuleContext::new(), value, |e| out = Some(e));
        out.expect("complete was not called")
    }

    #[test]
    fn test_complete_called_once_on_success() {
        let mut calls = 0;
        FieldRule::new(FieldKind::SingleIp).run(&RuleContext::new(), "::1", |e| {
            assert!(e.is_none());
            calls += 1;
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_context_field_attached() {
        let ctx = RuleContext::for_field("gateway");
        let mut out = None;
        FieldRule::new(FieldKind::SingleIp).run(&ctx, "10.0.0.256", |e| out = e);
        let error = out.unwrap();
        assert_eq!(error.field.as_deref(), Some("gateway"));
        assert_eq!(error.message, "请输入有效的IP地址");
    }

    #[test]
    fn test_every_kind_accepts_empty() {
        for kind in FieldKind::ALL {
            assert!(verdict(FieldRule::new(kind), "").is_none(), "{kind}");
        }
    }

    #[test]
    fn test_limits_flow_into_list_rules() {
        let rule = FieldRule::new(FieldKind::PortList)
            .with_limits(ListLimits::default().with_port_list(1));
        let error = rule.check(&[80u16, 443]).unwrap_err();
        assert_eq!(error.message, "最多填写 1 个端口");
        assert_eq!(error.category, ErrorCategory::Cardinality);
    }

    #[test]
    fn test_end_without_companion_needs_start() {
        let error = FieldRule::new(FieldKind::EndIp).check("10.0.0.1").unwrap_err();
        assert_eq!(error.category, ErrorCategory::Prerequisite);
    }

    #[test]
    fn test_paired_companion_ignored_for_start_kinds() {
        let rule = FieldRule::from(FieldKind::StartPort);
        assert!(rule.check_paired("22", "garbage").is_ok());
    }

    #[test]
    fn test_as_validator() {
        let rule: Box<dyn Validate> = Box::new(FieldRule::new(FieldKind::Email));
        assert!(rule.validate_raw(Raw::Text("ops@example.com")).is_ok());
        assert!(rule.validate(&"nope".to_string()).is_err());
    }
}
