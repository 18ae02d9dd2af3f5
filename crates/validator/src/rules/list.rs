//! List rules: a cardinality ceiling, then fail-fast element checks.
//!
//! A non-list or empty list passes. Element messages name the 1-based
//! position and the offending value; only the first failure is reported.

use crate::address::{IpFamily, has_leading_zero_octet, is_zero_padded, split_endpoint};
use crate::config::ListLimits;
use crate::foundation::{
    AsRaw, ErrorCategory, Raw, RawList, ValidationError, ValidationResult,
};
use crate::predicates;

const IP_PORT_HINT: &str = "格式应为IPv4:端口 或 [IPv6]:端口";

/// The list to check, or `None` when the rule passes vacuously.
fn non_empty_list(value: Raw<'_>) -> Option<RawList<'_>> {
    value.as_list().filter(|list| !list.is_empty())
}

fn check_ceiling(list: RawList<'_>, max: usize, message: impl FnOnce() -> String) -> ValidationResult {
    if list.len() > max {
        return Err(ValidationError::too_many_items(message(), max, list.len()));
    }
    Ok(())
}

// ============================================================================
// IP LIST
// ============================================================================

/// IPv4/IPv6 addresses, at most [`ListLimits::default`] `ip_list` (5).
pub fn ip_list<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    ip_list_with_limit(value, ListLimits::default().ip_list)
}

/// [`ip_list`] with an explicit ceiling.
pub fn ip_list_with_limit<T: AsRaw + ?Sized>(value: &T, max: usize) -> ValidationResult {
    let Some(list) = non_empty_list(value.as_raw()) else {
        return Ok(());
    };
    check_ceiling(list, max, || format!("最多填写 {max} 个 IP"))?;

    for (position, item) in (1..).zip(list.iter()) {
        let rendered = item.render();
        let text = rendered.trim();
        if has_leading_zero_octet(text) {
            return Err(ValidationError::at_index(
                "leading_zero_octet",
                format!("第 {position} 项格式错误：{text} IP不允许前导0，格式应为IPv4 或 IPv6"),
                position,
                text.to_string(),
            )
            .with_category(ErrorCategory::LeadingZero));
        }
        if !predicates::ip(Raw::Text(text)) {
            return Err(ValidationError::at_index(
                "invalid_ip",
                format!("第 {position} 项格式错误：{text}，格式应为IPv4 或 IPv6"),
                position,
                text.to_string(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// PORT LIST
// ============================================================================

/// Ports, at most 6 by default. Zero-padded text is rejected.
pub fn port_list<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    port_list_with_limit(value, ListLimits::default().port_list)
}

/// [`port_list`] with an explicit ceiling.
pub fn port_list_with_limit<T: AsRaw + ?Sized>(value: &T, max: usize) -> ValidationResult {
    let Some(list) = non_empty_list(value.as_raw()) else {
        return Ok(());
    };
    check_ceiling(list, max, || format!("最多填写 {max} 个端口"))?;

    for (position, item) in (1..).zip(list.iter()) {
        let port = item.render();
        if item.as_text().is_some_and(|text| is_zero_padded(text.trim())) {
            return Err(ValidationError::at_index(
                "leading_zero_port",
                format!("第 {position} 项端口不允许前导零：{port}"),
                position,
                port.into_owned(),
            )
            .with_category(ErrorCategory::LeadingZero));
        }
        if !predicates::port(item) {
            return Err(ValidationError::at_index(
                "invalid_port",
                format!("第 {position} 项无效的端口：{port}（范围 0~65535）"),
                position,
                port.into_owned(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// FOLDER PATH LIST
// ============================================================================

/// Relative or absolute folder paths, at most 10 by default.
pub fn folder_path_list<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    folder_path_list_with_limit(value, ListLimits::default().folder_path_list)
}

/// [`folder_path_list`] with an explicit ceiling.
pub fn folder_path_list_with_limit<T: AsRaw + ?Sized>(value: &T, max: usize) -> ValidationResult {
    let Some(list) = non_empty_list(value.as_raw()) else {
        return Ok(());
    };
    check_ceiling(list, max, || format!("最多填写 {max} 个文件夹路径"))?;

    for (position, item) in (1..).zip(list.iter()) {
        let rendered = item.render();
        let text = rendered.trim();
        if !predicates::folder_path_flexible(Raw::Text(text)) {
            return Err(ValidationError::at_index(
                "invalid_folder_path",
                format!(
                    "第 {position} 项格式错误：{text}，格式应为文件夹路径，如：csa/app 或 /csa/app"
                ),
                position,
                text.to_string(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// IP:PORT LIST
// ============================================================================

/// `IPv4:port` / `[IPv6]:port` endpoints, unbounded by default.
pub fn ip_port_list<T: AsRaw + ?Sized>(value: &T) -> ValidationResult {
    ip_port_list_with_limit(value, ListLimits::default().ip_port_list)
}

/// [`ip_port_list`] with an optional ceiling.
pub fn ip_port_list_with_limit<T: AsRaw + ?Sized>(value: &T, max: Option<usize>) -> ValidationResult {
    let Some(list) = non_empty_list(value.as_raw()) else {
        return Ok(());
    };
    if let Some(max) = max {
        check_ceiling(list, max, || format!("最多填写 {max} 个 IP:端口"))?;
    }

    for (position, item) in (1..).zip(list.iter()) {
        let rendered = item.render();
        check_endpoint(position, rendered.trim())?;
    }
    Ok(())
}

fn check_endpoint(position: usize, item: &str) -> ValidationResult {
    let fail = |code: &'static str, message: String| {
        ValidationError::at_index(code, message, position, item.to_string())
    };

    if item.contains('：') {
        return Err(fail(
            "full_width_colon",
            format!("第 {position} 项格式错误：{item} 请使用英文 : 冒号"),
        )
        .with_category(ErrorCategory::Formatting));
    }

    let Some(endpoint) = split_endpoint(item) else {
        return Err(fail(
            "invalid_ip_port",
            format!("第 {position} 项格式错误：{item}，{IP_PORT_HINT}"),
        ));
    };
    let ip = endpoint.host;
    match endpoint.family {
        IpFamily::V6 => {
            if !predicates::ipv6(Raw::Text(ip)) {
                return Err(fail(
                    "invalid_ipv6",
                    format!("第 {position} 项格式错误：{ip} {IP_PORT_HINT}"),
                ));
            }
        }
        IpFamily::V4 => {
            if has_leading_zero_octet(ip) {
                return Err(fail(
                    "leading_zero_octet",
                    format!("第 {position} 项格式错误：{item} IP不允许前导0，{IP_PORT_HINT}"),
                )
                .with_category(ErrorCategory::LeadingZero));
            }
            if !predicates::ipv4(Raw::Text(ip)) {
                return Err(fail(
                    "invalid_ipv4",
                    format!("第 {position} 项格式错误：{ip}，{IP_PORT_HINT}"),
                ));
            }
        }
    }

    let port = endpoint.port;
    if is_zero_padded(port) {
        return Err(fail(
            "leading_zero_port",
            format!("第 {position} 项格式错误：{item} 端口不允许前导0，{IP_PORT_HINT}"),
        )
        .with_category(ErrorCategory::LeadingZero));
    }
    if !predicates::port(Raw::Text(port)) {
        return Err(fail(
            "invalid_port",
            format!("第 {position} 项无效端口：{port}（0~65535）"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_list_and_empty_pass() {
        assert!(ip_list("1.1.1.1").is_ok());
        assert!(ip_list(&json!([])).is_ok());
        assert!(port_list(&json!(null)).is_ok());
    }

    #[test]
    fn test_ceiling_before_elements() {
        let error = ip_list(&["bad"; 6]).unwrap_err();
        assert_eq!(error.message, "最多填写 5 个 IP");
        assert_eq!(error.category, ErrorCategory::Cardinality);

        let error = port_list(&[80u16; 7]).unwrap_err();
        assert_eq!(error.message, "最多填写 6 个端口");

        let error = ip_list_with_limit(&["1.1.1.1"; 3], 2).unwrap_err();
        assert_eq!(error.message, "最多填写 2 个 IP");
    }

    #[test]
    fn test_fail_fast_position() {
        let error = ip_list(&["1.1.1.1", "bad", "2.2.2.2"]).unwrap_err();
        assert_eq!(error.index(), Some(2));
        assert_eq!(error.message, "第 2 项格式错误：bad，格式应为IPv4 或 IPv6");
    }

    #[test]
    fn test_ip_leading_zero_distinct_from_range() {
        let error = ip_list(&["192.168.01.1"]).unwrap_err();
        assert_eq!(error.code, "leading_zero_octet");
        let error = ip_list(&["192.168.1.300"]).unwrap_err();
        assert_eq!(error.code, "invalid_ip");
    }

    #[test]
    fn test_port_elements() {
        assert!(port_list(&json!([80, "443", " 8080 ", "80.0", "0x50"])).is_ok());
        let error = port_list(&json!([80, "080"])).unwrap_err();
        assert_eq!(error.message, "第 2 项端口不允许前导零：080");
        let error = port_list(&json!([80, 70000])).unwrap_err();
        assert_eq!(error.message, "第 2 项无效的端口：70000（范围 0~65535）");
    }

    #[test]
    fn test_folder_paths() {
        let error = folder_path_list(&["csa/app", "/csa//app"]).unwrap_err();
        assert_eq!(error.index(), Some(2));
        assert!(folder_path_list(&["csa/app", "/opt/data"]).is_ok());
    }

    #[test]
    fn test_ip_port_elements() {
        assert!(ip_port_list(&["10.0.0.1:80", "[::1]:443"]).is_ok());
        let error = ip_port_list(&["192.168.1.1：80"]).unwrap_err();
        assert_eq!(error.code, "full_width_colon");
        assert_eq!(error.message, "第 1 项格式错误：192.168.1.1：80 请使用英文 : 冒号");
        let error = ip_port_list(&["10.0.0.1:80", "10.0.0.1:0080"]).unwrap_err();
        assert_eq!(error.code, "leading_zero_port");
        let error = ip_port_list(&["[1::2::3]:80"]).unwrap_err();
        assert_eq!(error.message, "第 1 项格式错误：1::2::3 格式应为IPv4:端口 或 [IPv6]:端口");
        let error = ip_port_list(&["10.0.0.1:80", "10.0.01.1:80"]).unwrap_err();
        assert_eq!(error.code, "leading_zero_octet");
        assert_eq!(error.category, ErrorCategory::LeadingZero);
        assert_eq!(
            error.message,
            "第 2 项格式错误：10.0.01.1:80 IP不允许前导0，格式应为IPv4:端口 或 [IPv6]:端口"
        );
        let error = ip_port_list(&["10.0.0.256:80"]).unwrap_err();
        assert_eq!(error.code, "invalid_ipv4");
        assert_eq!(error.message, "第 1 项格式错误：10.0.0.256，格式应为IPv4:端口 或 [IPv6]:端口");
        let error = ip_port_list(&["10.0.0.1:99999"]).unwrap_err();
        assert_eq!(error.message, "第 1 项无效端口：99999（0~65535）");
        assert!(ip_port_list_with_limit(&["10.0.0.1:80"; 3], Some(2)).is_err());
    }
}
