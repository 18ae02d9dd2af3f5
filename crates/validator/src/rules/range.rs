//! Start/end pairs for numbers, IP addresses and ports.
//!
//! "Start" rules check their own value. "End" rules also take the current
//! start value as an explicit argument and check the order against it; the
//! engine keeps nothing between calls.
//!
//! | pair   | end passes when                         |
//! |--------|-----------------------------------------|
//! | value  | `end > start`                           |
//! | IP     | `end >= start`, same family             |
//! | port   | `end > start`, neither zero-padded      |

use std::cmp::Ordering;

use crate::address::{self, AddressError, has_leading_zero_octet, is_zero_padded};
use crate::catalogue::{FieldKind, match_rule};
use crate::foundation::{AsRaw, ErrorCategory, Raw, ValidationError, ValidationResult};
use crate::predicates;

// ============================================================================
// NUMERIC VALUES
// ============================================================================

fn finite(value: Raw<'_>) -> Option<f64> {
    value.to_number().filter(|n| n.is_finite())
}

/// Start of a numeric range: any finite number.
pub fn start_value<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    let raw = value.as_raw();
    if raw.is_empty() || finite(raw).is_some() {
        return Ok(());
    }
    Err(match_rule(FieldKind::StartValue).error())
}

/// End of a numeric range: a finite number strictly greater than `start`.
///
/// ```
/// use fieldcheck_validator::rules::range::end_value;
///
/// assert!(end_value("10", &"5").is_ok());
/// assert_eq!(end_value("5", &"5").unwrap_err().message, "结束值必须大于起始值");
/// assert_eq!(end_value("5", &None::<f64>).unwrap_err().message, "请先填写起始值");
/// ```
pub fn end_value<T, S>(value: &T, start: &S) -> ValidationResult
where
    T: AsRaw + ?Sized,
    S: AsRaw + ?Sized,
{
    let raw = value.as_raw();
    if raw.is_empty() {
        return Ok(());
    }
    let Some(end) = finite(raw) else {
        return Err(match_rule(FieldKind::EndValue).error());
    };
    let Some(start) = finite(start.as_raw()) else {
        return Err(ValidationError::start_required("请先填写起始值"));
    };
    if end > start {
        Ok(())
    } else {
        Err(ValidationError::range_order("结束值必须大于起始值"))
    }
}

// ============================================================================
// IP ADDRESSES
// ============================================================================

/// Shape check shared by both ends of an IP range.
fn own_ip(raw: Raw<'_>, kind: FieldKind) -> ValidationResult {
    if raw
        .as_text()
        .is_some_and(|text| has_leading_zero_octet(text.trim()))
    {
        return Err(ValidationError::new(
            "leading_zero_octet",
            "IP不允许前导0，格式应为IPv4 或 IPv6",
        )
        .with_category(ErrorCategory::LeadingZero));
    }
    if !predicates::ip(raw) {
        return Err(match_rule(kind).error());
    }
    Ok(())
}

/// Start of an IP range: IPv4 or IPv6.
pub fn start_ip<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    let raw = value.as_raw();
    if raw.is_empty() {
        return Ok(());
    }
    own_ip(raw, FieldKind::StartIp)
}

/// End of an IP range: same family as `start` and not below it.
///
/// An end equal to the start is accepted, so a range may hold one address.
pub fn end_ip<T, S>(value: &T, start: &S) -> ValidationResult
where
    T: AsRaw + ?Sized,
    S: AsRaw + ?Sized,
{
    let raw = value.as_raw();
    if raw.is_empty() {
        return Ok(());
    }
    own_ip(raw, FieldKind::EndIp)?;

    let start = start.as_raw();
    if !predicates::ip(start) {
        return Err(ValidationError::start_required("请先填写起始IP"));
    }
    let (Some(start), Some(end)) = (start.as_text(), raw.as_text()) else {
        return Err(ValidationError::start_required("请先填写起始IP"));
    };

    match address::compare_addresses(end, start) {
        Ok(Ordering::Less) => Err(ValidationError::range_order("结束IP必须不小于起始IP")),
        Ok(_) => Ok(()),
        Err(AddressError::FamilyMismatch { .. }) => Err(ValidationError::new(
            "family_mismatch",
            "起始IP与结束IP协议不一致（需同为IPv4或IPv6）",
        )
        .with_category(ErrorCategory::FamilyMismatch)),
        Err(error) => Err(ValidationError::new("address_parse_failed", "IP地址解析失败")
            .with_param("reason", error.to_string())),
    }
}

// ============================================================================
// PORTS
// ============================================================================

fn padded_port(raw: Raw<'_>) -> Option<ValidationError> {
    let text = raw.as_text()?;
    is_zero_padded(text.trim()).then(|| {
        ValidationError::new("leading_zero_port", format!("端口不允许前导零：{text}"))
            .with_category(ErrorCategory::LeadingZero)
            .with_param("value", text.to_string())
    })
}

/// Start of a port range: an unpadded port.
pub fn start_port<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    let raw = value.as_raw();
    if raw.is_empty() {
        return Ok(());
    }
    if let Some(error) = padded_port(raw) {
        return Err(error);
    }
    if !predicates::port(raw) {
        return Err(match_rule(FieldKind::StartPort).error());
    }
    Ok(())
}

/// End of a port range: an unpadded port strictly greater than `start`.
///
/// The start value is held to the same rules, so a padded or invalid start
/// is reported here too.
pub fn end_port<T, S>(value: &T, start: &S) -> ValidationResult
where
    T: AsRaw + ?Sized,
    S: AsRaw + ?Sized,
{
    let raw = value.as_raw();
    if raw.is_empty() {
        return Ok(());
    }
    if let Some(error) = padded_port(raw) {
        return Err(error);
    }
    let Some(end) = predicates::port_value(raw) else {
        return Err(match_rule(FieldKind::EndPort).error());
    };

    let start = start.as_raw();
    if start.is_empty() {
        return Err(ValidationError::start_required("请先填写起始端口"));
    }
    if let Some(error) = padded_port(start) {
        return Err(error);
    }
    let Some(start) = predicates::port_value(start) else {
        return Err(match_rule(FieldKind::StartPort).error());
    };

    if end > start {
        Ok(())
    } else {
        Err(ValidationError::range_order("结束端口必须大于起始端口"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_value() {
        assert!(start_value("").is_ok());
        assert!(start_value(" -3.5 ").is_ok());
        assert_eq!(start_value("abc").unwrap_err().message, "起始值必须为数字");
        assert!(start_value("inf").is_err());
    }

    #[test]
    fn test_end_value_order() {
        assert!(end_value(&10, &5).is_ok());
        assert_eq!(end_value(&5, &5).unwrap_err().category, ErrorCategory::RangeOrder);
        assert_eq!(end_value("x", &5).unwrap_err().message, "结束值必须为数字");
        assert_eq!(end_value(&5, "").unwrap_err().category, ErrorCategory::Prerequisite);
    }

    #[test]
    fn test_end_ip_allows_equal() {
        assert!(end_ip("10.0.0.5", "10.0.0.5").is_ok());
        assert!(end_ip("10.0.0.6", "10.0.0.5").is_ok());
        let error = end_ip("10.0.0.3", "10.0.0.5").unwrap_err();
        assert_eq!(error.message, "结束IP必须不小于起始IP");
    }

    #[test]
    fn test_end_ip_family_and_prerequisite() {
        let error = end_ip("::1", "10.0.0.1").unwrap_err();
        assert_eq!(error.code, "family_mismatch");
        assert_eq!(error.category, ErrorCategory::FamilyMismatch);
        assert_eq!(end_ip("::2", "").unwrap_err().message, "请先填写起始IP");
        assert_eq!(end_ip("::2", "garbage").unwrap_err().message, "请先填写起始IP");
        assert!(end_ip("2001:db8::ffff", "2001:db8::1").is_ok());
    }

    #[test]
    fn test_ip_leading_zero() {
        let error = start_ip("10.0.0.01").unwrap_err();
        assert_eq!(error.message, "IP不允许前导0，格式应为IPv4 或 IPv6");
        assert_eq!(start_ip("10.0.0").unwrap_err().message, "格式应为IPv4 或 IPv6");
    }

    #[test]
    fn test_port_range() {
        assert!(end_port(&8080, &80).is_ok());
        assert_eq!(
            end_port(&80, &80).unwrap_err().message,
            "结束端口必须大于起始端口"
        );
        assert_eq!(end_port("0080", &80).unwrap_err().message, "端口不允许前导零：0080");
        assert_eq!(end_port(&90, "080").unwrap_err().message, "端口不允许前导零：080");
        assert_eq!(end_port(&90, "").unwrap_err().message, "请先填写起始端口");
        assert_eq!(end_port(&90, "abc").unwrap_err().message, "起始端口无效（0~65535）");
        assert_eq!(end_port(&70000, &1).unwrap_err().message, "结束端口无效（0~65535）");
        assert_eq!(start_port("070").unwrap_err().code, "leading_zero_port");
    }
}
