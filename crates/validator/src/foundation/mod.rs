//! Core validation types and traits
//!
//! This module contains the building blocks shared by every rule:
//!
//! - **Traits**: [`Validate`]
//! - **Errors**: [`ValidationError`], [`ErrorCategory`]
//! - **Inputs**: [`Raw`], [`RawList`], [`AsRaw`]
//!
//! # Architecture
//!
//! ## 1. Loosely typed input, strictly typed verdict
//!
//! Form widgets produce strings, numbers, `null` or arrays. Everything is
//! viewed through [`Raw`], and every check returns a
//! [`ValidationResult`]: `Ok(())` or exactly one [`ValidationError`].
//!
//! ```rust,ignore
//! use fieldcheck_validator::foundation::{AsRaw, Raw};
//!
//! assert_eq!("8080".as_raw(), Raw::Text("8080"));
//! assert_eq!(8080u16.as_raw(), Raw::Number(8080.0));
//! ```
//!
//! ## 2. Rich error information
//!
//! ```rust,ignore
//! let error = ValidationError::at_index("invalid_ip", "第 2 项格式错误：bad，格式应为IPv4 或 IPv6", 2, "bad")
//!     .with_field("whitelist");
//! ```

pub mod error;
pub mod raw;
pub mod traits;

pub use error::{ErrorCategory, ValidationError};
pub use raw::{AsRaw, ListElement, Raw, RawList};
pub use traits::Validate;

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;
