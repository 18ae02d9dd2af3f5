//! List checks returning a `{ valid, message }` verdict.
//!
//! These are the programmatic counterparts of the list rules: instead of a
//! callback they return a [`BatchVerdict`], and they are stricter about the
//! container itself. A non-list or an empty list is a failure here.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::address::is_zero_padded;
use crate::foundation::{AsRaw, RawList};
use crate::predicates;

pub use crate::config::DEFAULT_MAX_COUNT;

/// Outcome of a batch check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchVerdict {
    pub valid: bool,
    pub message: Cow<'static, str>,
}

impl BatchVerdict {
    fn pass(message: &'static str) -> Self {
        Self {
            valid: true,
            message: Cow::Borrowed(message),
        }
    }

    fn fail(message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        tracing::debug!(message = %message, "batch rejected");
        Self {
            valid: false,
            message,
        }
    }
}

/// Container-level checks shared by every batch function.
struct Container {
    not_a_list: &'static str,
    empty: &'static str,
    /// Noun used in the ceiling message, e.g. `IP地址`.
    noun: &'static str,
}

impl Container {
    fn open<'a, T: AsRaw + ?Sized>(
        &self,
        values: &'a T,
        max_count: usize,
    ) -> Result<RawList<'a>, BatchVerdict> {
        let Some(list) = values.as_raw().as_list() else {
            return Err(BatchVerdict::fail(self.not_a_list));
        };
        if list.is_empty() {
            return Err(BatchVerdict::fail(self.empty));
        }
        if list.len() > max_count {
            return Err(BatchVerdict::fail(format!(
                "最多允许输入 {max_count} 个{}",
                self.noun
            )));
        }
        Ok(list)
    }
}

const IPS: Container = Container {
    not_a_list: "IP列表必须是数组格式",
    empty: "请输入至少一个IP地址",
    noun: "IP地址",
};

const PORTS: Container = Container {
    not_a_list: "端口列表必须是数组格式",
    empty: "请输入至少一个端口号",
    noun: "端口号",
};

const FOLDER_PATHS: Container = Container {
    not_a_list: "文件夹路径列表必须是数组格式",
    empty: "请输入至少一个文件夹路径",
    noun: "文件夹路径",
};

/// Checks a list of IP addresses.
///
/// ```
/// use fieldcheck_validator::batch::{validate_ip_list, DEFAULT_MAX_COUNT};
///
/// let verdict = validate_ip_list(&["10.0.0.1", "::1"], DEFAULT_MAX_COUNT);
/// assert!(verdict.valid);
/// assert_eq!(verdict.message, "IP地址格式正确");
/// ```
pub fn validate_ip_list<T: AsRaw + ?Sized>(values: &T, max_count: usize) -> BatchVerdict {
    let list = match IPS.open(values, max_count) {
        Ok(list) => list,
        Err(verdict) => return verdict,
    };
    for (position, item) in (1..).zip(list.iter()) {
        if !predicates::ip(item) {
            return BatchVerdict::fail(format!("第 {position} 个IP地址无效：{}", item.render()));
        }
    }
    BatchVerdict::pass("IP地址格式正确")
}

/// Checks a list of ports; zero-padded text is rejected.
pub fn validate_port_list<T: AsRaw + ?Sized>(values: &T, max_count: usize) -> BatchVerdict {
    let list = match PORTS.open(values, max_count) {
        Ok(list) => list,
        Err(verdict) => return verdict,
    };
    for (position, item) in (1..).zip(list.iter()) {
        let port = item.render();
        if item.as_text().is_some_and(|text| is_zero_padded(text.trim())) {
            return BatchVerdict::fail(format!("第 {position} 个端口号不允许前导零：{port}"));
        }
        if !predicates::port(item) {
            return BatchVerdict::fail(format!(
                "第 {position} 个端口号无效：{port}（范围：0-65535）"
            ));
        }
    }
    BatchVerdict::pass("端口号格式正确")
}

/// Checks a list of relative or absolute folder paths.
pub fn validate_folder_path_list<T: AsRaw + ?Sized>(values: &T, max_count: usize) -> BatchVerdict {
    let list = match FOLDER_PATHS.open(values, max_count) {
        Ok(list) => list,
        Err(verdict) => return verdict,
    };
    for (position, item) in (1..).zip(list.iter()) {
        if !predicates::folder_path_flexible(item) {
            return BatchVerdict::fail(format!(
                "第 {position} 个文件夹路径无效：{}，格式应为文件夹路径，如：csa/app 或 /csa/app",
                item.render()
            ));
        }
    }
    BatchVerdict::pass("文件夹路径格式正确")
}
