//! Prelude module for convenient imports.
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//!
//! let rule = FieldRule::new(FieldKind::SinglePort);
//! assert!(rule.check("8080").is_ok());
//! assert!(single_port("080").is_err());
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, inputs
// ============================================================================

pub use crate::foundation::{
    AsRaw, ErrorCategory, Raw, Validate, ValidationError, ValidationResult,
};

// ============================================================================
// CATALOGUE AND CONFIG
// ============================================================================

pub use crate::catalogue::{CatalogueEntry, FieldKind, Rule, match_rule, match_rule_named};
pub use crate::config::{DEFAULT_MAX_COUNT, ListLimits};

// ============================================================================
// ADDRESSES AND PREDICATES
// ============================================================================

pub use crate::address::{Address, AddressError, IpFamily, compare_addresses, parse_address};

pub use crate::predicates::{
    has_no_special_chars, is_chinese_only, is_digits_only, is_finite_number, is_letters_only,
    is_valid, is_valid_bank_card, is_valid_chinese_name, is_valid_email, is_valid_english_name,
    is_valid_folder_path, is_valid_folder_path_flexible, is_valid_folder_path_list,
    is_valid_id_card, is_valid_ip, is_valid_ip_list, is_valid_ip_port, is_valid_ip_port_list,
    is_valid_ipv4, is_valid_ipv6, is_valid_mac_address, is_valid_name, is_valid_phone,
    is_valid_port, is_valid_port_list, is_valid_postal_code, is_valid_strong_password,
    is_valid_tel, is_valid_url,
};

// ============================================================================
// RULES
// ============================================================================

pub use crate::rules::list::{
    folder_path_list, folder_path_list_with_limit, ip_list, ip_list_with_limit, ip_port_list,
    ip_port_list_with_limit, port_list, port_list_with_limit,
};
pub use crate::rules::range::{end_ip, end_port, end_value, start_ip, start_port, start_value};
pub use crate::rules::scalar::{single_ip, single_ip_port, single_port};
pub use crate::rules::{FieldRule, RuleContext};

// ============================================================================
// BATCH VERDICTS AND PRESETS
// ============================================================================

pub use crate::batch::{
    BatchVerdict, validate_folder_path_list, validate_ip_list, validate_port_list,
};
pub use crate::presets::{PresetRule, Trigger, builtin_rule, builtin_rule_names};
