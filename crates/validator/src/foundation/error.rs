//! Error types for validation failures
//!
//! Every rejected value produces exactly one [`ValidationError`]: a stable
//! machine code, the human-readable message shown next to the field, an
//! [`ErrorCategory`] from the engine's taxonomy, and a few parameters
//! (`index`, `value`, `max`, ...) for callers that re-render the message.
//!
//! All string fields use `Cow<'static, str>` so the fixed messages of the
//! scalar rules never allocate.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// ERROR CATEGORY
// ============================================================================

/// Which family of rule a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The input does not match the literal grammar of its field kind.
    #[default]
    Shape,
    /// Both ends are well-formed but violate the required ordering.
    RangeOrder,
    /// An "end" field was validated before its "start" field was filled.
    Prerequisite,
    /// An IPv4 address was paired with an IPv6 address.
    FamilyMismatch,
    /// A list holds more elements than its ceiling allows.
    Cardinality,
    /// Locale punctuation where ASCII is required (full-width colon).
    Formatting,
    /// A numerically valid octet or port written with a leading zero.
    LeadingZero,
}

impl ErrorCategory {
    /// Snake-case name, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::RangeOrder => "range_order",
            Self::Prerequisite => "prerequisite",
            Self::FamilyMismatch => "family_mismatch",
            Self::Cardinality => "cardinality",
            Self::Formatting => "formatting",
            Self::LeadingZero => "leading_zero",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation failure.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::foundation::{ErrorCategory, ValidationError};
///
/// let error = ValidationError::new("invalid_ip", "请输入有效的IP地址")
///     .with_field("gateway")
///     .with_param("value", "10.0.0.256");
///
/// assert_eq!(error.category, ErrorCategory::Shape);
/// assert_eq!(error.param("value"), Some("10.0.0.256"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code for programmatic handling.
    ///
    /// Examples: "invalid_ip", "leading_zero_port", "range_order"
    pub code: Cow<'static, str>,

    /// Message rendered next to the field.
    pub message: Cow<'static, str>,

    /// Field path supplied by the caller's rule context.
    pub field: Option<Cow<'static, str>>,

    /// Ordered key-value parameters (typically 0-3).
    pub params: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 3]>,

    /// Taxonomy bucket for this failure.
    pub category: ErrorCategory,
}

impl ValidationError {
    /// Creates a new shape error with a code and message.
    ///
    /// Static strings are borrowed, formatted strings are owned.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: SmallVec::new(),
            category: ErrorCategory::Shape,
        }
    }

    /// Sets the field path for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Sets the taxonomy bucket.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_category(mut self, category: ErrorCategory) -> Self {
        self.category = category;
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// The 1-based list position this error refers to, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.param("index").and_then(|i| i.parse().ok())
    }

    /// Converts the error to a JSON structure for transport to the form layer.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code,
            "message": self.message,
            "field": self.field,
            "category": self.category,
            "params": params,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// A list element at 1-based `index` failed.
    pub fn at_index(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        index: usize,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, message)
            .with_param("index", index.to_string())
            .with_param("value", value)
    }

    /// A list exceeded its cardinality ceiling.
    pub fn too_many_items(message: impl Into<Cow<'static, str>>, max: usize, actual: usize) -> Self {
        Self::new("too_many_items", message)
            .with_category(ErrorCategory::Cardinality)
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// An "end" field was checked before its "start" field had a usable value.
    pub fn start_required(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("start_required", message).with_category(ErrorCategory::Prerequisite)
    }

    /// Both ends parsed but are in the wrong order.
    pub fn range_order(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("range_order", message).with_category(ErrorCategory::RangeOrder)
    }
}

// ============================================================================
// TESTS
// ============================================================================
