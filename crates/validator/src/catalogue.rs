//! The fixed field-kind catalogue.
//!
//! Every [`FieldKind`] maps to exactly one [`CatalogueEntry`]: a [`Rule`]
//! (compiled pattern or composite predicate) plus the message shown when a
//! value fails it. The table is immutable and built once.
//!
//! Patterns use `[0-9]` instead of `\d`: the `regex` crate's `\d` matches any
//! Unicode decimal digit, which would let full-width digits through.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::foundation::{AsRaw, Raw, Validate, ValidationError};
use crate::predicates;

// ============================================================================
// PATTERNS
// ============================================================================

/// Dotted-quad IPv4, no zero-padded octets.
pub static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$",
    )
    .unwrap()
});

pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Mainland mobile number.
pub static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").unwrap());

/// Landline: area code, number, optional extension.
pub static TEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[0-9]{2,3}-?[0-9]{7,8}(-[0-9]{1,6})?$").unwrap());

pub static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
    .unwrap()
});

/// Absolute folder path.
pub static FOLDER_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[a-zA-Z0-9_\-/]+$").unwrap());

/// Relative or absolute folder path. Slash runs and trailing slashes are
/// rejected separately.
pub static FOLDER_PATH_FLEXIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/?[a-zA-Z0-9_\-/]+$").unwrap());

/// CJK, ASCII letters and digits, `_`, `-` and whitespace.
pub static NO_SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{4e00}-\x{9fa5}a-zA-Z0-9_\-\s]+$").unwrap());

/// 18-digit resident identity number.
pub static ID_CARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[1-9][0-9]{5}(18|19|20)[0-9]{2}((0[1-9])|(1[0-2]))(([0-2][1-9])|10|20|30|31)[0-9]{3}[0-9Xx]$",
    )
    .unwrap()
});

pub static BANK_CARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{12,18}$").unwrap());

pub static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{5}$").unwrap());

pub static MAC_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}([0-9A-Fa-f]{2})$").unwrap());

pub static CHINESE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{4e00}-\x{9fa5}]{2,4}$").unwrap());

pub static ENGLISH_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s\-]{2,50}$").unwrap());

/// Character set of a strong password. Composition is checked in code.
pub static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").unwrap());

pub static DIGITS_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

pub static LETTERS_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

pub static CHINESE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{4e00}-\x{9fa5}]+$").unwrap());

/// `[host]:port`
pub static IPV6_ENDPOINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]:([0-9]{1,5})$").unwrap());

/// `host:port` with no brackets or colons in the host.
pub static IPV4_ENDPOINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:\[\]]+):([0-9]{1,5})$").unwrap());

// ============================================================================
// FIELD KIND
// ============================================================================

/// Closed set of validated field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Name,
    Email,
    Phone,
    Website,
    FolderPath,
    #[serde(rename = "singleIP")]
    SingleIp,
    SinglePort,
    IpList,
    PortList,
    SingleIpPort,
    IpPortList,
    FolderPathList,
    IdCard,
    BankCard,
    PostalCode,
    MacAddress,
    ChineseName,
    EnglishName,
    StrongPassword,
    DigitsOnly,
    LettersOnly,
    ChineseOnly,
    StartValue,
    EndValue,
    #[serde(rename = "startIP")]
    StartIp,
    #[serde(rename = "endIP")]
    EndIp,
    StartPort,
    EndPort,
}

impl FieldKind {
    /// Every kind, in catalogue order.
    pub const ALL: [FieldKind; 28] = [
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Website,
        FieldKind::FolderPath,
        FieldKind::SingleIp,
        FieldKind::SinglePort,
        FieldKind::IpList,
        FieldKind::PortList,
        FieldKind::SingleIpPort,
        FieldKind::IpPortList,
        FieldKind::FolderPathList,
        FieldKind::IdCard,
        FieldKind::BankCard,
        FieldKind::PostalCode,
        FieldKind::MacAddress,
        FieldKind::ChineseName,
        FieldKind::EnglishName,
        FieldKind::StrongPassword,
        FieldKind::DigitsOnly,
        FieldKind::LettersOnly,
        FieldKind::ChineseOnly,
        FieldKind::StartValue,
        FieldKind::EndValue,
        FieldKind::StartIp,
        FieldKind::EndIp,
        FieldKind::StartPort,
        FieldKind::EndPort,
    ];

    /// Stable camelCase name, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Website => "website",
            FieldKind::FolderPath => "folderPath",
            FieldKind::SingleIp => "singleIP",
            FieldKind::SinglePort => "singlePort",
            FieldKind::IpList => "ipList",
            FieldKind::PortList => "portList",
            FieldKind::SingleIpPort => "singleIpPort",
            FieldKind::IpPortList => "ipPortList",
            FieldKind::FolderPathList => "folderPathList",
            FieldKind::IdCard => "idCard",
            FieldKind::BankCard => "bankCard",
            FieldKind::PostalCode => "postalCode",
            FieldKind::MacAddress => "macAddress",
            FieldKind::ChineseName => "chineseName",
            FieldKind::EnglishName => "englishName",
            FieldKind::StrongPassword => "strongPassword",
            FieldKind::DigitsOnly => "digitsOnly",
            FieldKind::LettersOnly => "lettersOnly",
            FieldKind::ChineseOnly => "chineseOnly",
            FieldKind::StartValue => "startValue",
            FieldKind::EndValue => "endValue",
            FieldKind::StartIp => "startIP",
            FieldKind::EndIp => "endIP",
            FieldKind::StartPort => "startPort",
            FieldKind::EndPort => "endPort",
        }
    }

    /// `true` for kinds whose value is a list of scalars.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(
            self,
            FieldKind::IpList | FieldKind::PortList | FieldKind::IpPortList | FieldKind::FolderPathList
        )
    }

    /// `true` for the "end" half of a range pair, which is checked against
    /// a companion start value.
    #[must_use]
    pub const fn is_range_end(self) -> bool {
        matches!(self, FieldKind::EndValue | FieldKind::EndIp | FieldKind::EndPort)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field kind name outside the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field kind '{0}'")]
pub struct UnknownFieldKind(pub String);

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownFieldKind(s.to_string()))
    }
}

// ============================================================================
// RULES
// ============================================================================

/// A total predicate over a raw value.
pub type Predicate = fn(Raw<'_>) -> bool;

/// How a catalogue entry decides a value.
#[derive(Clone, Copy)]
pub enum Rule {
    /// The trimmed text must match the whole pattern.
    Pattern(&'static LazyLock<Regex>),
    /// A procedure combining patterns, parsing and structural checks.
    Composite(Predicate),
}

impl Rule {
    /// Runs the rule. Non-text values never match a pattern.
    #[must_use]
    pub fn test(&self, value: Raw<'_>) -> bool {
        match self {
            Rule::Pattern(pattern) => value
                .as_text()
                .is_some_and(|text| pattern.is_match(text.trim())),
            Rule::Composite(predicate) => predicate(value),
        }
    }

    /// The compiled pattern, for pattern rules.
    #[must_use]
    pub fn pattern(&self) -> Option<&'static Regex> {
        match self {
            Rule::Pattern(pattern) => Some(LazyLock::force(*pattern)),
            Rule::Composite(_) => None,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Rule::Composite(_) => f.write_str("Composite"),
        }
    }
}

/// One row of the catalogue.
#[derive(Debug, Clone, Copy)]
pub struct CatalogueEntry {
    pub kind: FieldKind,
    pub rule: Rule,
    /// Stable machine code reported on failure.
    pub code: &'static str,
    /// Canonical failure message.
    pub message: &'static str,
}

impl CatalogueEntry {
    /// Runs this entry's rule against a value.
    #[must_use]
    pub fn matches<T: AsRaw + ?Sized>(&self, value: &T) -> bool {
        self.rule.test(value.as_raw())
    }

    /// The entry's failure as a [`ValidationError`].
    #[must_use]
    pub fn error(&self) -> ValidationError {
        ValidationError::new(self.code, self.message)
    }
}

/// Empty values pass; anything else must satisfy the rule.
impl Validate for CatalogueEntry {
    fn validate_raw(&self, input: Raw<'_>) -> Result<(), ValidationError> {
        if input.is_empty() || self.rule.test(input) {
            Ok(())
        } else {
            Err(self.error())
        }
    }
}

const fn pattern(
    kind: FieldKind,
    regex: &'static LazyLock<Regex>,
    code: &'static str,
    message: &'static str,
) -> CatalogueEntry {
    CatalogueEntry {
        kind,
        rule: Rule::Pattern(regex),
        code,
        message,
    }
}

const fn composite(
    kind: FieldKind,
    predicate: Predicate,
    code: &'static str,
    message: &'static str,
) -> CatalogueEntry {
    CatalogueEntry {
        kind,
        rule: Rule::Composite(predicate),
        code,
        message,
    }
}

static CATALOGUE: [CatalogueEntry; 28] = [
    composite(
        FieldKind::Name,
        predicates::no_special_chars,
        "invalid_name",
        "名称不能包含特殊字符",
    ),
    pattern(FieldKind::Email, &EMAIL, "invalid_email", "请输入有效的邮箱地址"),
    pattern(FieldKind::Phone, &PHONE, "invalid_phone", "请输入有效的手机号"),
    pattern(
        FieldKind::Website,
        &URL,
        "invalid_url",
        "请输入有效的网站地址，如：https://example.com",
    ),
    pattern(
        FieldKind::FolderPath,
        &FOLDER_PATH,
        "invalid_folder_path",
        "请输入有效的文件夹路径，如：/csa/app",
    ),
    composite(FieldKind::SingleIp, predicates::ip, "invalid_ip", "请输入有效的IP地址"),
    composite(
        FieldKind::SinglePort,
        predicates::port,
        "invalid_port",
        "请输入有效的端口号（范围：0-65535）",
    ),
    composite(FieldKind::IpList, predicates::ip_list, "invalid_ip", "格式应为IPv4 或 IPv6"),
    composite(
        FieldKind::PortList,
        predicates::port_list,
        "invalid_port",
        "无效的端口（范围 0~65535）",
    ),
    composite(
        FieldKind::SingleIpPort,
        predicates::ip_port,
        "invalid_ip_port",
        "格式应为IPv4:端口 或 [IPv6]:端口",
    ),
    composite(
        FieldKind::IpPortList,
        predicates::ip_port_list,
        "invalid_ip_port",
        "格式应为IPv4:端口 或 [IPv6]:端口",
    ),
    composite(
        FieldKind::FolderPathList,
        predicates::folder_path_list,
        "invalid_folder_path",
        "格式应为文件夹路径，如：csa/app 或 /csa/app",
    ),
    pattern(FieldKind::IdCard, &ID_CARD, "invalid_id_card", "请输入有效的身份证号"),
    pattern(FieldKind::BankCard, &BANK_CARD, "invalid_bank_card", "请输入有效的银行卡号"),
    pattern(
        FieldKind::PostalCode,
        &POSTAL_CODE,
        "invalid_postal_code",
        "请输入有效的邮政编码",
    ),
    pattern(FieldKind::MacAddress, &MAC_ADDRESS, "invalid_mac_address", "请输入有效的MAC地址"),
    pattern(
        FieldKind::ChineseName,
        &CHINESE_NAME,
        "invalid_chinese_name",
        "请输入有效的中文姓名（2-4个字符）",
    ),
    pattern(
        FieldKind::EnglishName,
        &ENGLISH_NAME,
        "invalid_english_name",
        "请输入有效的英文姓名（2-50个字符）",
    ),
    composite(
        FieldKind::StrongPassword,
        predicates::strong_password,
        "weak_password",
        "密码必须至少8位，包含大小写字母、数字和特殊字符",
    ),
    pattern(FieldKind::DigitsOnly, &DIGITS_ONLY, "not_digits", "只能输入数字"),
    pattern(FieldKind::LettersOnly, &LETTERS_ONLY, "not_letters", "只能输入字母"),
    pattern(FieldKind::ChineseOnly, &CHINESE_ONLY, "not_chinese", "只能输入中文字符"),
    composite(FieldKind::StartValue, predicates::finite_number, "not_a_number", "起始值必须为数字"),
    composite(FieldKind::EndValue, predicates::finite_number, "not_a_number", "结束值必须为数字"),
    composite(FieldKind::StartIp, predicates::ip, "invalid_ip", "格式应为IPv4 或 IPv6"),
    composite(FieldKind::EndIp, predicates::ip, "invalid_ip", "格式应为IPv4 或 IPv6"),
    composite(FieldKind::StartPort, predicates::port, "invalid_port", "起始端口无效（0~65535）"),
    composite(FieldKind::EndPort, predicates::port, "invalid_port", "结束端口无效（0~65535）"),
];

/// The catalogue entry for a declared kind.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::catalogue::{FieldKind, match_rule};
///
/// let entry = match_rule(FieldKind::Email);
/// assert!(entry.matches("ops@example.com"));
/// assert_eq!(entry.message, "请输入有效的邮箱地址");
/// ```
#[must_use]
pub fn match_rule(kind: FieldKind) -> &'static CatalogueEntry {
    &CATALOGUE[kind as usize]
}

/// Looks up an entry by its camelCase name; `None` for undeclared names.
#[must_use]
pub fn match_rule_named(name: &str) -> Option<&'static CatalogueEntry> {
    name.parse::<FieldKind>().ok().map(match_rule)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_kind() {
        for kind in FieldKind::ALL {
            assert_eq!(match_rule(kind).kind, kind);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>(), Ok(kind));
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
        assert_eq!(FieldKind::SingleIp.to_string(), "singleIP");
    }

    #[test]
    fn test_unknown_kind_is_absent() {
        assert!(match_rule_named("creditScore").is_none());
        assert!(match_rule_named("singleIp").is_none());
        assert!(match_rule_named("ipPortList").is_some());
    }

    #[test]
    fn test_pattern_rules_trim() {
        let email = match_rule(FieldKind::Email);
        assert!(email.matches("  ops@example.com "));
        assert!(!email.matches(&42));
        assert!(email.rule.pattern().is_some());
        assert!(match_rule(FieldKind::SingleIp).rule.pattern().is_none());
    }

    #[test]
    fn test_ascii_digit_classes() {
        // Full-width digits must not pass as digits.
        assert!(!match_rule(FieldKind::DigitsOnly).matches("１２３"));
        assert!(match_rule(FieldKind::DigitsOnly).matches("123"));
        assert!(!match_rule(FieldKind::PostalCode).matches("１00000"));
    }

    #[test]
    fn test_entry_as_validator() {
        let entry = match_rule(FieldKind::Phone);
        assert!(entry.validate("").is_ok());
        assert!(entry.validate("13800138000").is_ok());
        let error = entry.validate("12345").unwrap_err();
        assert_eq!(error.code, "invalid_phone");
        assert_eq!(error.message, "请输入有效的手机号");
    }

    #[test]
    fn test_name_entry_checks_characters_only() {
        let entry = match_rule(FieldKind::Name);
        assert!(entry.validate(&"a".repeat(129)).is_ok());
        assert_eq!(entry.validate("a/b").unwrap_err().message, "名称不能包含特殊字符");
    }

    #[test]
    fn test_endpoint_patterns() {
        assert!(IPV6_ENDPOINT.is_match("[::1]:80"));
        assert!(!IPV6_ENDPOINT.is_match("[::1]:"));
        assert!(IPV4_ENDPOINT.is_match("10.0.0.1:80"));
        assert!(!IPV4_ENDPOINT.is_match("::1:80"));
    }
}
