//! Total boolean predicates, one per field kind.
//!
//! Every predicate trims surrounding whitespace and answers `false` for
//! missing values, wrong shapes and non-text input; none of them panic.
//! Leading-zero policy for ports is *not* applied here: `is_valid_port("070")`
//! is `true`, and the rule layer rejects the padding.

use crate::address::{self, IpFamily, is_zero_padded, split_endpoint};
use crate::catalogue::{
    self, FOLDER_PATH_FLEXIBLE, FieldKind, IPV4, NO_SPECIAL_CHARS, PASSWORD_CHARSET, TEL,
};
use crate::foundation::{AsRaw, Raw};

/// Longest accepted name, in characters, before trimming.
pub const NAME_MAX_CHARS: usize = 128;

/// Characters that satisfy the "special character" requirement of a strong
/// password.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

// ============================================================================
// RAW-LEVEL CHECKS
// ============================================================================

fn trimmed(value: Raw<'_>) -> Option<&str> {
    value.as_text().map(str::trim).filter(|text| !text.is_empty())
}

fn by_kind(kind: FieldKind, value: Raw<'_>) -> bool {
    catalogue::match_rule(kind).rule.test(value)
}

pub(crate) fn ipv4(value: Raw<'_>) -> bool {
    trimmed(value).is_some_and(|text| IPV4.is_match(text))
}

pub(crate) fn ipv6(value: Raw<'_>) -> bool {
    trimmed(value).is_some_and(|text| address::parse_ipv6(text).is_ok())
}

pub(crate) fn ip(value: Raw<'_>) -> bool {
    ipv4(value) || ipv6(value)
}

/// The port number of a value: an integral number in `0..=65535`, either
/// given as a number or as text coerced like [`Raw::to_number`] (`"80.0"`,
/// `"+80"`, `"0x50"` all mean 80).
pub(crate) fn port_value(value: Raw<'_>) -> Option<u16> {
    match value {
        Raw::Number(_) | Raw::Text(_) => value
            .to_number()
            .filter(|n| n.fract() == 0.0 && (0.0..=65535.0).contains(n))
            .map(|n| n as u16),
        _ => None,
    }
}

pub(crate) fn port(value: Raw<'_>) -> bool {
    port_value(value).is_some()
}

pub(crate) fn tel(value: Raw<'_>) -> bool {
    trimmed(value).is_some_and(|text| TEL.is_match(text))
}

pub(crate) fn folder_path_flexible(value: Raw<'_>) -> bool {
    trimmed(value).is_some_and(|text| {
        text != "/"
            && !text.contains("//")
            && !text.ends_with('/')
            && FOLDER_PATH_FLEXIBLE.is_match(text)
    })
}

pub(crate) fn no_special_chars(value: Raw<'_>) -> bool {
    trimmed(value).is_some_and(|text| NO_SPECIAL_CHARS.is_match(text))
}

/// Length is counted on the untrimmed text.
pub(crate) fn name(value: Raw<'_>) -> bool {
    value
        .as_text()
        .is_some_and(|text| text.chars().count() <= NAME_MAX_CHARS)
        && no_special_chars(value)
}

pub(crate) fn strong_password(value: Raw<'_>) -> bool {
    trimmed(value).is_some_and(|text| {
        text.bytes().any(|b| b.is_ascii_lowercase())
            && text.bytes().any(|b| b.is_ascii_uppercase())
            && text.bytes().any(|b| b.is_ascii_digit())
            && text.chars().any(|c| PASSWORD_SPECIALS.contains(c))
            && PASSWORD_CHARSET.is_match(text)
    })
}

pub(crate) fn finite_number(value: Raw<'_>) -> bool {
    value.to_number().is_some_and(f64::is_finite)
}

/// `IPv4:port` or `[IPv6]:port`, ASCII colon, unpadded port.
pub(crate) fn ip_port(value: Raw<'_>) -> bool {
    let Some(text) = trimmed(value) else {
        return false;
    };
    let Some(endpoint) = split_endpoint(text) else {
        return false;
    };
    let host_ok = match endpoint.family {
        IpFamily::V4 => address::parse_ipv4(endpoint.host).is_ok(),
        IpFamily::V6 => address::parse_ipv6(endpoint.host).is_ok(),
    };
    host_ok && !is_zero_padded(endpoint.port) && port(Raw::Text(endpoint.port))
}

/// Every element passes `check`. An empty list passes; a non-list does not.
fn every(value: Raw<'_>, check: fn(Raw<'_>) -> bool) -> bool {
    value
        .as_list()
        .is_some_and(|list| list.iter().all(check))
}

pub(crate) fn ip_list(value: Raw<'_>) -> bool {
    every(value, ip)
}

pub(crate) fn port_list(value: Raw<'_>) -> bool {
    every(value, port)
}

pub(crate) fn folder_path_list(value: Raw<'_>) -> bool {
    every(value, folder_path_flexible)
}

pub(crate) fn ip_port_list(value: Raw<'_>) -> bool {
    every(value, ip_port)
}

// ============================================================================
// PUBLIC PREDICATES
// ============================================================================

macro_rules! predicates {
    ($( $(#[$meta:meta])* $public:ident => $check:expr; )*) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $public<T: AsRaw + ?Sized>(value: &T) -> bool {
                let check: fn(Raw<'_>) -> bool = $check;
                check(value.as_raw())
            }
        )*
    };
}

predicates! {
    /// Dotted-quad IPv4 without zero-padded octets.
    ///
    /// ```
    /// use fieldcheck_validator::predicates::is_valid_ipv4;
    ///
    /// assert!(is_valid_ipv4("10.0.0.1"));
    /// assert!(!is_valid_ipv4("10.0.0.01"));
    /// ```
    is_valid_ipv4 => ipv4;
    /// Full or `::`-compressed IPv6.
    is_valid_ipv6 => ipv6;
    /// `is_valid_ipv4 || is_valid_ipv6`.
    is_valid_ip => ip;
    /// Integer in `0..=65535`, as a number or numeric text (`"80.0"`, `"0x50"`).
    is_valid_port => port;
    is_valid_email => |v| by_kind(FieldKind::Email, v);
    /// Mainland mobile number.
    is_valid_phone => |v| by_kind(FieldKind::Phone, v);
    /// Landline number with optional area code separator and extension.
    is_valid_tel => tel;
    /// `http://` or `https://` URL.
    is_valid_url => |v| by_kind(FieldKind::Website, v);
    /// Absolute folder path (`/csa/app`).
    is_valid_folder_path => |v| by_kind(FieldKind::FolderPath, v);
    /// Relative or absolute folder path; no `//`, no trailing `/`.
    is_valid_folder_path_flexible => folder_path_flexible;
    /// Only CJK, ASCII alphanumerics, `_`, `-` and whitespace.
    has_no_special_chars => no_special_chars;
    /// At most 128 characters and no special characters.
    is_valid_name => name;
    is_valid_id_card => |v| by_kind(FieldKind::IdCard, v);
    is_valid_bank_card => |v| by_kind(FieldKind::BankCard, v);
    is_valid_postal_code => |v| by_kind(FieldKind::PostalCode, v);
    /// Six hex pairs separated by `:` or `-`.
    is_valid_mac_address => |v| by_kind(FieldKind::MacAddress, v);
    is_valid_chinese_name => |v| by_kind(FieldKind::ChineseName, v);
    is_valid_english_name => |v| by_kind(FieldKind::EnglishName, v);
    /// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, with one lowercase,
    /// one uppercase, one digit and one special character.
    is_valid_strong_password => strong_password;
    is_digits_only => |v| by_kind(FieldKind::DigitsOnly, v);
    is_letters_only => |v| by_kind(FieldKind::LettersOnly, v);
    is_chinese_only => |v| by_kind(FieldKind::ChineseOnly, v);
    /// A number, or text parsing to one, that is finite.
    is_finite_number => finite_number;
    /// `IPv4:port` or `[IPv6]:port`.
    is_valid_ip_port => ip_port;
    /// A list whose every element is an IP address.
    is_valid_ip_list => ip_list;
    /// A list whose every element is a port.
    is_valid_port_list => port_list;
    /// A list whose every element is a flexible folder path.
    is_valid_folder_path_list => folder_path_list;
    /// A list whose every element is an `IP:port` endpoint.
    is_valid_ip_port_list => ip_port_list;
}

/// Runs the catalogue rule of `kind` against `value`.
#[must_use]
pub fn is_valid<T: AsRaw + ?Sized>(kind: FieldKind, value: &T) -> bool {
    catalogue::match_rule(kind).matches(value)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ipv4_octets() {
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("100.1.1.1"));
        assert!(!is_valid_ipv4("01.1.1.1"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(is_valid_ipv4(" 10.0.0.1 "));
        assert!(!is_valid_ipv4(&json!(null)));
    }

    #[test]
    fn test_ipv6_forms() {
        assert!(is_valid_ipv6("::"));
        assert!(is_valid_ipv6("::1"));
        assert!(is_valid_ipv6("2001:db8::8a2e:370:7334"));
        assert!(!is_valid_ipv6("1::2::3"));
        assert!(is_valid_ip("::1"));
        assert!(is_valid_ip("1.2.3.4"));
    }

    #[test]
    fn test_port_ignores_leading_zero() {
        assert!(is_valid_port("8080"));
        assert!(is_valid_port("070"));
        assert!(is_valid_port(&0));
        assert!(is_valid_port(&65535u32));
        assert!(!is_valid_port(&65536));
        assert!(!is_valid_port("-1"));
        assert!(!is_valid_port("80.5"));
        assert!(is_valid_port("80.0"));
        assert!(is_valid_port("+80"));
        assert!(is_valid_port("1e3"));
        assert!(is_valid_port("0x50"));
        assert!(!is_valid_port("1e5"));
        assert!(!is_valid_port("Infinity"));
        assert!(!is_valid_port("   "));
        assert!(!is_valid_port(&80.5));
        assert!(!is_valid_port(""));
        assert!(!is_valid_port(&true));
    }

    #[test]
    fn test_folder_paths() {
        assert!(is_valid_folder_path("/csa/app"));
        assert!(!is_valid_folder_path("csa/app"));
        assert!(is_valid_folder_path_flexible("csa/app"));
        assert!(is_valid_folder_path_flexible("/csa/app"));
        assert!(!is_valid_folder_path_flexible("/csa//app"));
        assert!(!is_valid_folder_path_flexible("/csa/app/"));
        assert!(!is_valid_folder_path_flexible("/"));
    }

    #[test]
    fn test_name_length_is_untrimmed() {
        assert!(is_valid_name("服务器 A_1"));
        assert!(!is_valid_name("a*b"));
        let long = format!("{} ", "a".repeat(128));
        assert!(!is_valid_name(long.as_str()));
    }

    #[test]
    fn test_strong_password() {
        assert!(is_valid_strong_password("Passw0rd!"));
        assert!(!is_valid_strong_password("password1!"));
        assert!(!is_valid_strong_password("Passw0rd"));
        assert!(!is_valid_strong_password("Pa0!"));
        assert!(!is_valid_strong_password("Passw0rd!#"));
    }

    #[test]
    fn test_scalar_patterns() {
        assert!(is_valid_email("a.b@example.cn"));
        assert!(is_valid_phone("13912345678"));
        assert!(!is_valid_phone("12912345678"));
        assert!(is_valid_tel("010-12345678"));
        assert!(is_valid_tel("0755-1234567-89"));
        assert!(is_valid_url("https://www.example.com/a?b=c"));
        assert!(is_valid_id_card("11010519491231002X"));
        assert!(is_valid_bank_card("6222021234567890123"));
        assert!(is_valid_mac_address("00:1A:2b:3c:4D:5e"));
        assert!(is_valid_chinese_name("张三"));
        assert!(!is_valid_chinese_name("张"));
        assert!(is_valid_english_name("Mary-Jane Watson"));
        assert!(is_chinese_only("中文"));
        assert!(is_letters_only("abc"));
        assert!(!is_digits_only("12a"));
    }

    #[test]
    fn test_ip_port() {
        assert!(is_valid_ip_port("10.0.0.1:80"));
        assert!(is_valid_ip_port("[::1]:8080"));
        assert!(!is_valid_ip_port("10.0.0.1:080"));
        assert!(!is_valid_ip_port("10.0.0.1:70000"));
        assert!(!is_valid_ip_port("10.0.0.1：80"));
        assert!(!is_valid_ip_port("[10.0.0.1]:80"));
    }

    #[test]
    fn test_list_membership() {
        assert!(is_valid_ip_list(&json!(["1.1.1.1", "::1"])));
        assert!(!is_valid_ip_list(&json!(["1.1.1.1", "bad"])));
        assert!(is_valid_ip_list(&Vec::<String>::new()));
        assert!(!is_valid_ip_list("1.1.1.1"));
        assert!(is_valid_port_list(&[80u16, 443]));
        assert!(is_valid_folder_path_list(&["csa/app", "/opt"]));
        assert!(is_valid_ip_port_list(&["10.0.0.1:22"]));
    }

    #[test]
    fn test_dispatch_by_kind() {
        assert!(is_valid(FieldKind::SingleIp, "::1"));
        assert!(!is_valid(FieldKind::StartValue, "abc"));
        assert!(is_valid(FieldKind::EndValue, &12.5));
    }
}
