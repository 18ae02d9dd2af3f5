//! Cardinality configuration for list fields

use serde::{Deserialize, Serialize};

/// Default ceiling used by the batch verdict functions.
pub const DEFAULT_MAX_COUNT: usize = 10;

/// Maximum element counts for list-typed fields.
///
/// Missing keys fall back to the defaults when deserialized:
///
/// ```
/// use fieldcheck_validator::config::ListLimits;
///
/// let limits: ListLimits = serde_json::from_str(r#"{ "port_list": 3 }"#).unwrap();
/// assert_eq!(limits.port_list, 3);
/// assert_eq!(limits.ip_list, 5);
/// assert_eq!(limits.ip_port_list, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListLimits {
    /// Addresses in an IP list
    pub ip_list: usize,

    /// Ports in a port list
    pub port_list: usize,

    /// Paths in a folder-path list
    pub folder_path_list: usize,

    /// Endpoints in an IP:port list (`None` = unbounded)
    pub ip_port_list: Option<usize>,
}

impl Default for ListLimits {
    fn default() -> Self {
        Self {
            ip_list: 5,
            port_list: 6,
            folder_path_list: 10,
            ip_port_list: None,
        }
    }
}

impl ListLimits {
    #[must_use = "builder methods must be chained or built"]
    pub fn with_ip_list(mut self, max: usize) -> Self {
        self.ip_list = max;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_port_list(mut self, max: usize) -> Self {
        self.port_list = max;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_folder_path_list(mut self, max: usize) -> Self {
        self.folder_path_list = max;
        self
    }

    /// Caps IP:port lists, which are unbounded by default.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_ip_port_list(mut self, max: usize) -> Self {
        self.ip_port_list = Some(max);
        self
    }
}
