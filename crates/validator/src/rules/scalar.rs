//! Single-value rules.
//!
//! Each rule passes empty values (`None`, `null`, `""`) and otherwise reports
//! the first failed check as exactly one [`ValidationError`].

use crate::address::{IpFamily, is_zero_padded, split_endpoint};
use crate::catalogue::{FieldKind, match_rule};
use crate::foundation::{AsRaw, ErrorCategory, Raw, Validate, ValidationError, ValidationResult};
use crate::predicates::{self, NAME_MAX_CHARS};

/// Runs the plain catalogue entry of `kind`.
fn catalogue_rule(kind: FieldKind, value: Raw<'_>) -> ValidationResult {
    match_rule(kind).validate_raw(value)
}

macro_rules! catalogue_rules {
    ($( $(#[$meta:meta])* $name:ident => $kind:ident; )*) => {
        $(
            $(#[$meta])*
            pub fn $name<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
                catalogue_rule(FieldKind::$kind, value.as_raw())
            }
        )*
    };
}

catalogue_rules! {
    email => Email;
    phone => Phone;
    /// `http(s)://` URL.
    website => Website;
    /// Absolute folder path such as `/csa/app`.
    folder_path => FolderPath;
    /// IPv4 or IPv6 address.
    single_ip => SingleIp;
    id_card => IdCard;
    bank_card => BankCard;
    postal_code => PostalCode;
    mac_address => MacAddress;
    /// Two to four CJK characters.
    chinese_name => ChineseName;
    english_name => EnglishName;
    strong_password => StrongPassword;
    digits_only => DigitsOnly;
    letters_only => LettersOnly;
    chinese_only => ChineseOnly;
}

/// Display name: at most 128 characters, no special characters.
///
/// ```
/// use fieldcheck_validator::rules::scalar::name;
///
/// assert!(name("核心交换机-01").is_ok());
/// assert_eq!(name("a/b").unwrap_err().message, "名称不能包含特殊字符");
/// ```
pub fn name<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    let raw = value.as_raw();
    if raw.is_empty() {
        return Ok(());
    }
    if raw
        .as_text()
        .is_some_and(|text| text.chars().count() > NAME_MAX_CHARS)
    {
        return Err(ValidationError::new(
            "name_too_long",
            "名称不能超过 128 个字符",
        )
        .with_param("max", NAME_MAX_CHARS.to_string()));
    }
    catalogue_rule(FieldKind::Name, raw)
}

/// Port number in `0..=65535`, rejecting zero-padded text such as `"080"`.
pub fn single_port<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    let raw = value.as_raw();
    if raw.is_empty() {
        return Ok(());
    }
    if raw.as_text().is_some_and(|text| is_zero_padded(text.trim())) {
        return Err(
            ValidationError::new("leading_zero_port", "端口不允许前导零")
                .with_category(ErrorCategory::LeadingZero),
        );
    }
    catalogue_rule(FieldKind::SinglePort, raw)
}

/// One `IPv4:port` or `[IPv6]:port` endpoint.
pub fn single_ip_port<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    let raw = value.as_raw();
    if raw.is_empty() {
        return Ok(());
    }
    let rendered = raw.render();
    let text = rendered.trim();

    let Some(endpoint) = split_endpoint(text) else {
        return Err(match_rule(FieldKind::SingleIpPort).error());
    };
    match endpoint.family {
        IpFamily::V6 if !predicates::ipv6(Raw::Text(endpoint.host)) => {
            return Err(ValidationError::new("invalid_ipv6", "无效的IPv6地址"));
        }
        IpFamily::V4 if !predicates::ipv4(Raw::Text(endpoint.host)) => {
            return Err(ValidationError::new("invalid_ipv4", "无效的IPv4地址"));
        }
        _ => {}
    }

    if is_zero_padded(endpoint.port) {
        return Err(ValidationError::new(
            "leading_zero_port",
            format!("端口不允许前导零：{}", endpoint.port),
        )
        .with_category(ErrorCategory::LeadingZero)
        .with_param("value", endpoint.port.to_string()));
    }
    if !predicates::port(Raw::Text(endpoint.port)) {
        return Err(ValidationError::new("invalid_port", "端口无效（0~65535）")
            .with_param("value", endpoint.port.to_string()));
    }
    Ok(())
}
