//! Reusable form presets.
//!
//! A preset is a named list of pattern rules with the event that triggers
//! them. Unlike the catalogue, presets test the value as entered (no
//! trimming) and carry their own, shorter messages.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalogue::{MAC_ADDRESS, PHONE};
use crate::foundation::{AsRaw, ErrorCategory, ValidationError, ValidationResult};

/// Form event that runs a preset rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Blur,
    Change,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Blur => f.write_str("blur"),
            Trigger::Change => f.write_str("change"),
        }
    }
}

/// One pattern rule of a preset.
#[derive(Clone, Copy)]
pub struct PresetRule {
    pub pattern: &'static LazyLock<Regex>,
    pub message: &'static str,
    pub trigger: Trigger,
}

impl PresetRule {
    /// Tests a value. Empty values pass.
    pub fn check<T: AsRaw + ?Sized>(&self, value: &T) -> ValidationResult {
        let raw = value.as_raw();
        if raw.is_empty() || self.pattern.is_match(&raw.render()) {
            return Ok(());
        }
        Err(ValidationError::new("pattern_mismatch", self.message)
            .with_category(ErrorCategory::Shape)
            .with_param("trigger", self.trigger.to_string()))
    }
}

impl fmt::Debug for PresetRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresetRule")
            .field("pattern", &self.pattern.as_str())
            .field("message", &self.message)
            .field("trigger", &self.trigger)
            .finish()
    }
}

static DISPLAY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{4e00}-\x{9fa5}a-zA-Z\s]{2,20}$").unwrap());

/// Looser IPv4 shape used by the `ip` preset.
static LOOSE_IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((25[0-5]|(2[0-4]|1[0-9]|[1-9]|)[0-9])\.?\b){4}$").unwrap()
});

static ABSOLUTE_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/[^\s]*$").unwrap());

const fn on_blur(pattern: &'static LazyLock<Regex>, message: &'static str) -> PresetRule {
    PresetRule {
        pattern,
        message,
        trigger: Trigger::Blur,
    }
}

static PRESETS: [(&str, &[PresetRule]); 5] = [
    ("name", &[on_blur(&DISPLAY_NAME, "只能输入2-20个字符，不允许特殊字符")]),
    ("ip", &[on_blur(&LOOSE_IPV4, "请输入正确的IP地址")]),
    ("mac", &[on_blur(&MAC_ADDRESS, "请输入正确的MAC地址")]),
    ("phone", &[on_blur(&PHONE, "请输入正确的手机号码")]),
    ("path", &[on_blur(&ABSOLUTE_PATH, "请输入正确的路径格式")]),
];

/// The rules of a preset, or `None` for an unknown name.
///
/// ```
/// use fieldcheck_validator::presets::builtin_rule;
///
/// let rules = builtin_rule("phone").unwrap();
/// assert!(rules[0].check("13800138000").is_ok());
/// assert!(builtin_rule("zip").is_none());
/// ```
#[must_use]
pub fn builtin_rule(name: &str) -> Option<&'static [PresetRule]> {
    PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, rules)| *rules)
}

/// Names of all presets, in declaration order.
pub fn builtin_rule_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, _)| *name)
}
