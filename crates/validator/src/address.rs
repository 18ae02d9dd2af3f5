//! IP address parsing into canonical, order-comparable integers.
//!
//! - IPv4: exactly four dot-separated decimal octets in `0..=255`. An octet
//!   may only start with `0` if it *is* `0`; `010` is rejected even though it
//!   is numerically valid, so no reader can mistake it for an octal literal.
//! - IPv6: eight colon-separated groups of 1-4 hex digits, or a single `::`
//!   standing for one or more zero groups.
//!
//! Canonical values are big-endian `u32` / `u128`. Values of different
//! families never compare; asking for their order is an error.

use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::catalogue::{IPV4_ENDPOINT, IPV6_ENDPOINT};
use crate::foundation::{ErrorCategory, ValidationError};

// ============================================================================
// TYPES
// ============================================================================

/// Protocol family of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    V4,
    V6,
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpFamily::V4 => f.write_str("IPv4"),
            IpFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// A parsed address in canonical numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    V4(u32),
    V6(u128),
}

impl Address {
    #[must_use]
    pub const fn family(&self) -> IpFamily {
        match self {
            Address::V4(_) => IpFamily::V4,
            Address::V6(_) => IpFamily::V6,
        }
    }

    /// Orders two addresses of the same family.
    ///
    /// # Errors
    ///
    /// [`AddressError::FamilyMismatch`] when the families differ.
    pub fn try_cmp(&self, other: &Address) -> Result<Ordering, AddressError> {
        match (self, other) {
            (Address::V4(a), Address::V4(b)) => Ok(a.cmp(b)),
            (Address::V6(a), Address::V6(b)) => Ok(a.cmp(b)),
            _ => Err(AddressError::FamilyMismatch {
                left: self.family(),
                right: other.family(),
            }),
        }
    }
}

impl From<Address> for IpAddr {
    fn from(address: Address) -> Self {
        match address {
            Address::V4(bits) => IpAddr::V4(Ipv4Addr::from(bits)),
            Address::V6(bits) => IpAddr::V6(Ipv6Addr::from(bits)),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        IpAddr::from(*self).fmt(f)
    }
}

/// Why a textual address could not be canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("'{0}' is neither IPv4- nor IPv6-shaped")]
    UnknownShape(String),

    #[error("IPv4 address must have 4 octets, found {found}")]
    OctetCount { found: usize },

    #[error("octet '{octet}' has a leading zero")]
    LeadingZero { octet: String },

    #[error("octet '{octet}' is not a decimal number")]
    InvalidOctet { octet: String },

    #[error("octet '{octet}' is greater than 255")]
    OctetOutOfRange { octet: String },

    #[error("group '{group}' is not 1-4 hex digits")]
    InvalidGroup { group: String },

    #[error("'::' may appear at most once")]
    MultipleCompression,

    #[error("IPv6 address has {found} groups, expected 8")]
    GroupCount { found: usize },

    #[error("cannot compare an {left} address with an {right} address")]
    FamilyMismatch { left: IpFamily, right: IpFamily },
}

impl AddressError {
    /// Stable machine code, as used in [`ValidationError::code`].
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty_address",
            Self::UnknownShape(_) => "unknown_address_shape",
            Self::OctetCount { .. } => "octet_count",
            Self::LeadingZero { .. } => "leading_zero_octet",
            Self::InvalidOctet { .. } => "invalid_octet",
            Self::OctetOutOfRange { .. } => "octet_out_of_range",
            Self::InvalidGroup { .. } => "invalid_group",
            Self::MultipleCompression => "multiple_compression",
            Self::GroupCount { .. } => "group_count",
            Self::FamilyMismatch { .. } => "family_mismatch",
        }
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::LeadingZero { .. } => ErrorCategory::LeadingZero,
            Self::FamilyMismatch { .. } => ErrorCategory::FamilyMismatch,
            _ => ErrorCategory::Shape,
        }
    }
}

impl From<AddressError> for ValidationError {
    fn from(error: AddressError) -> Self {
        ValidationError::new(error.code(), error.to_string()).with_category(error.category())
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// `true` for a decimal literal padded with a leading zero (`"01"`, `"080"`).
///
/// `"0"` itself is not padded.
#[must_use]
pub fn is_zero_padded(text: &str) -> bool {
    text.len() > 1 && text.starts_with('0') && text.bytes().all(|b| b.is_ascii_digit())
}

/// `true` for a dotted value with exactly four segments, one of them
/// zero-padded (`"192.168.01.1"`).
///
/// Used to tell a leading-zero octet apart from a generally malformed address.
#[must_use]
pub fn has_leading_zero_octet(text: &str) -> bool {
    if !text.contains('.') {
        return false;
    }
    let mut segments = 0;
    let mut padded = false;
    for segment in text.split('.') {
        segments += 1;
        padded |= is_zero_padded(segment);
    }
    segments == 4 && padded
}

/// Parses a dotted-quad IPv4 address.
///
/// # Errors
///
/// Returns the first problem found, scanning octets left to right.
pub fn parse_ipv4(text: &str) -> Result<u32, AddressError> {
    if text.is_empty() {
        return Err(AddressError::Empty);
    }

    let found = text.split('.').count();
    if found != 4 {
        return Err(AddressError::OctetCount { found });
    }

    let mut bits = 0u32;
    for octet in text.split('.') {
        if octet.is_empty() || !octet.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressError::InvalidOctet {
                octet: octet.to_string(),
            });
        }
        if is_zero_padded(octet) {
            return Err(AddressError::LeadingZero {
                octet: octet.to_string(),
            });
        }
        let value = match octet.parse::<u8>() {
            Ok(value) => value,
            Err(_) => {
                return Err(AddressError::OctetOutOfRange {
                    octet: octet.to_string(),
                });
            }
        };
        bits = (bits << 8) | u32::from(value);
    }

    Ok(bits)
}

fn parse_group(group: &str) -> Result<u16, AddressError> {
    let invalid = || AddressError::InvalidGroup {
        group: group.to_string(),
    };
    if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u16::from_str_radix(group, 16).map_err(|_| invalid())
}

fn parse_groups(text: &str, out: &mut Vec<u16>) -> Result<(), AddressError> {
    if text.is_empty() {
        return Ok(());
    }
    for group in text.split(':') {
        out.push(parse_group(group)?);
    }
    Ok(())
}

/// Parses an IPv6 address in full or `::`-compressed form.
///
/// # Errors
///
/// - [`AddressError::MultipleCompression`] for more than one `::`
/// - [`AddressError::GroupCount`] unless the groups expand to exactly 8
///   (a `::` always stands for at least one zero group)
/// - [`AddressError::InvalidGroup`] for empty or non-hex groups
pub fn parse_ipv6(text: &str) -> Result<u128, AddressError> {
    if text.is_empty() {
        return Err(AddressError::Empty);
    }

    let mut head = Vec::with_capacity(8);
    let mut tail = Vec::with_capacity(8);

    match text.matches("::").count() {
        0 => {
            parse_groups(text, &mut head)?;
            if head.len() != 8 {
                return Err(AddressError::GroupCount { found: head.len() });
            }
        }
        1 => {
            let (left, right) = text.split_once("::").ok_or(AddressError::MultipleCompression)?;
            parse_groups(left, &mut head)?;
            parse_groups(right, &mut tail)?;
            let explicit = head.len() + tail.len();
            if explicit > 7 {
                return Err(AddressError::GroupCount {
                    found: explicit + 1,
                });
            }
        }
        _ => return Err(AddressError::MultipleCompression),
    }

    let zeros = 8 - head.len() - tail.len();
    let bits = head
        .iter()
        .copied()
        .chain(std::iter::repeat_n(0u16, zeros))
        .chain(tail.iter().copied())
        .fold(0u128, |acc, group| (acc << 16) | u128::from(group));

    Ok(bits)
}

/// Parses either family, choosing by shape.
///
/// Input is trimmed. A value containing `.` is IPv4-shaped; otherwise a value
/// containing `:` is IPv6-shaped; anything else is an unknown shape.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::address::{Address, parse_address};
///
/// assert_eq!(parse_address("10.0.0.1").unwrap(), Address::V4(0x0a00_0001));
/// assert_eq!(parse_address("::1").unwrap(), Address::V6(1));
/// assert!(parse_address("10.0.0.01").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<Address, AddressError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AddressError::Empty);
    }
    if text.contains('.') {
        parse_ipv4(text).map(Address::V4)
    } else if text.contains(':') {
        parse_ipv6(text).map(Address::V6)
    } else {
        Err(AddressError::UnknownShape(text.to_string()))
    }
}

/// Parses both values and orders `left` against `right`.
///
/// # Errors
///
/// Any parse failure, or [`AddressError::FamilyMismatch`].
pub fn compare_addresses(left: &str, right: &str) -> Result<Ordering, AddressError> {
    let left = parse_address(left)?;
    let right = parse_address(right)?;
    left.try_cmp(&right)
}

// ============================================================================
// ENDPOINTS
// ============================================================================

/// An `IPv4:port` or `[IPv6]:port` value split into its parts.
///
/// Neither part is validated beyond its outer shape: the host contains no
/// brackets or colons (IPv4 form) and the port is 1-5 ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub host: &'a str,
    pub port: &'a str,
    /// The family implied by the syntax: bracketed hosts are IPv6.
    pub family: IpFamily,
}

/// Splits an endpoint literal; `None` when neither form matches.
#[must_use]
pub fn split_endpoint(text: &str) -> Option<Endpoint<'_>> {
    let (captures, family) = if let Some(c) = IPV6_ENDPOINT.captures(text) {
        (c, IpFamily::V6)
    } else {
        (IPV4_ENDPOINT.captures(text)?, IpFamily::V4)
    };
    let host = captures.get(1)?.as_str();
    let port = captures.get(2)?.as_str();
    Some(Endpoint { host, port, family })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_valid() {
        assert_eq!(parse_ipv4("0.0.0.0"), Ok(0));
        assert_eq!(parse_ipv4("255.255.255.255"), Ok(u32::MAX));
        assert_eq!(parse_ipv4("192.168.10.1"), Ok(0xc0a8_0a01));
        assert_eq!(parse_ipv4("100.0.0.1"), Ok(0x6400_0001));
    }

    #[test]
    fn test_ipv4_leading_zero() {
        assert_eq!(
            parse_ipv4("10.0.0.01"),
            Err(AddressError::LeadingZero { octet: "01".into() })
        );
        assert!(matches!(parse_ipv4("010.1.1.1"), Err(AddressError::LeadingZero { .. })));
        assert!(matches!(parse_ipv4("1.1.1.000"), Err(AddressError::LeadingZero { .. })));
    }

    #[test]
    fn test_ipv4_out_of_range() {
        assert_eq!(
            parse_ipv4("10.0.0.256"),
            Err(AddressError::OctetOutOfRange { octet: "256".into() })
        );
        assert!(matches!(parse_ipv4("1.1.1.9999"), Err(AddressError::OctetOutOfRange { .. })));
    }

    #[test]
    fn test_ipv4_shape() {
        assert_eq!(parse_ipv4("1.1.1"), Err(AddressError::OctetCount { found: 3 }));
        assert_eq!(parse_ipv4("1.1.1.1.1"), Err(AddressError::OctetCount { found: 5 }));
        assert!(matches!(parse_ipv4("1..1.1"), Err(AddressError::InvalidOctet { .. })));
        assert!(matches!(parse_ipv4("1.a.1.1"), Err(AddressError::InvalidOctet { .. })));
        assert!(matches!(parse_ipv4("1.+1.1.1"), Err(AddressError::InvalidOctet { .. })));
    }

    #[test]
    fn test_ipv6_compression() {
        assert_eq!(parse_ipv6("::"), Ok(0));
        assert_eq!(parse_ipv6("::1"), Ok(1));
        assert_eq!(parse_ipv6("1::"), Ok(1u128 << 112));
        assert_eq!(parse_ipv6("2001:db8::1"), Ok(0x2001_0db8_0000_0000_0000_0000_0000_0001));
        assert_eq!(
            parse_ipv6("fe80:0:0:0:0:0:0:1"),
            Ok(0xfe80_0000_0000_0000_0000_0000_0000_0001)
        );
    }

    #[test]
    fn test_ipv6_rejects() {
        assert_eq!(parse_ipv6("1::2::3"), Err(AddressError::MultipleCompression));
        assert_eq!(parse_ipv6("::1::"), Err(AddressError::MultipleCompression));
        assert_eq!(parse_ipv6("1:2:3:4:5:6:7"), Err(AddressError::GroupCount { found: 7 }));
        assert_eq!(parse_ipv6("1:2:3:4:5:6:7::8"), Err(AddressError::GroupCount { found: 9 }));
        assert!(matches!(parse_ipv6(":::"), Err(AddressError::InvalidGroup { .. })));
        assert!(matches!(parse_ipv6("12345::"), Err(AddressError::InvalidGroup { .. })));
        assert!(matches!(parse_ipv6("g::1"), Err(AddressError::InvalidGroup { .. })));
        assert!(matches!(parse_ipv6(":1:2:3:4:5:6:7"), Err(AddressError::InvalidGroup { .. })));
    }

    #[test]
    fn test_ipv6_above_u64() {
        // Values that differ only above bit 64 must still order correctly.
        let low = parse_ipv6("1::ffff:ffff:ffff:ffff").unwrap();
        let high = parse_ipv6("2::").unwrap();
        assert!(low < high);
        assert!(low > u128::from(u64::MAX));
    }

    #[test]
    fn test_family_detection() {
        assert_eq!(parse_address(" 10.0.0.1 "), Ok(Address::V4(0x0a00_0001)));
        assert_eq!(parse_address("::"), Ok(Address::V6(0)));
        assert!(matches!(parse_address("localhost"), Err(AddressError::UnknownShape(_))));
        assert_eq!(parse_address("   "), Err(AddressError::Empty));
        // Dotted tails are IPv4-shaped and therefore malformed.
        assert!(parse_address("::ffff:1.2.3.4").is_err());
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare_addresses("10.0.0.5", "10.0.0.3"), Ok(Ordering::Greater));
        assert_eq!(compare_addresses("10.0.0.5", "10.0.0.5"), Ok(Ordering::Equal));
        assert_eq!(compare_addresses("::1", "::2"), Ok(Ordering::Less));
        assert_eq!(
            compare_addresses("10.0.0.1", "::1"),
            Err(AddressError::FamilyMismatch {
                left: IpFamily::V4,
                right: IpFamily::V6
            })
        );
    }

    #[test]
    fn test_std_conversion() {
        let address = parse_address("2001:db8::1").unwrap();
        assert_eq!(IpAddr::from(address), "2001:db8::1".parse::<IpAddr>().unwrap());
        assert_eq!(address.to_string(), "2001:db8::1");
    }

    #[test]
    fn test_leading_zero_octet_detection() {
        assert!(has_leading_zero_octet("192.168.01.1"));
        assert!(!has_leading_zero_octet("192.168.0.1"));
        assert!(!has_leading_zero_octet("01.1.1"));
        assert!(!has_leading_zero_octet("::1"));
        assert!(is_zero_padded("080"));
        assert!(!is_zero_padded("0"));
        assert!(!is_zero_padded("0x1"));
    }

    #[test]
    fn test_split_endpoint() {
        assert_eq!(
            split_endpoint("192.168.10.11:3001"),
            Some(Endpoint {
                host: "192.168.10.11",
                port: "3001",
                family: IpFamily::V4
            })
        );
        assert_eq!(
            split_endpoint("[::1]:8080"),
            Some(Endpoint {
                host: "::1",
                port: "8080",
                family: IpFamily::V6
            })
        );
        assert_eq!(split_endpoint("::1:8080"), None);
        assert_eq!(split_endpoint("10.0.0.1:123456"), None);
        assert_eq!(split_endpoint("10.0.0.1"), None);
    }

    #[test]
    fn test_error_conversion() {
        let error: ValidationError = AddressError::LeadingZero { octet: "01".into() }.into();
        assert_eq!(error.code, "leading_zero_octet");
        assert_eq!(error.category, ErrorCategory::LeadingZero);
    }
}
