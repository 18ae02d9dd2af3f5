//! # fieldcheck-validator
//!
//! Field validation for interactive forms: network addresses, ports, folder
//! paths, identifiers, names and credentials.
//!
//! ## Quick Start
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//!
//! // Plain predicates
//! assert!(is_valid_ip("2001:db8::1"));
//! assert!(!is_valid_ipv4("10.0.0.01"));
//!
//! // Rule functions return one error with a ready-to-show message
//! let error = ip_list(&["10.0.0.1", "bad"]).unwrap_err();
//! assert_eq!(error.index(), Some(2));
//!
//! // Range "end" rules take the start value explicitly
//! assert!(end_ip("10.0.0.5", "10.0.0.5").is_ok());
//! ```
//!
//! ## Layers
//!
//! - [`catalogue`]: the fixed mapping from [`FieldKind`](catalogue::FieldKind)
//!   to pattern or composite rule plus failure message
//! - [`address`]: IPv4/IPv6 parsing into `u32` / `u128` for ordering
//! - [`predicates`]: total `is_valid_*` checks
//! - [`rules`]: scalar, list and range rules, and the
//!   [`FieldRule`](rules::FieldRule) callback protocol
//! - [`batch`]: list checks returning a `{ valid, message }` verdict
//! - [`presets`]: named form presets
//!
//! Every entry point accepts anything implementing
//! [`AsRaw`](foundation::AsRaw): `&str`, `String`, integers, floats,
//! `Option<T>`, slices and `Vec`s, and `serde_json::Value`.

// ValidationError is returned by value from every rule; boxing it would add
// an allocation to each failing call.
#![allow(clippy::result_large_err)]

pub mod address;
pub mod batch;
pub mod catalogue;
pub mod config;
pub mod foundation;
pub mod predicates;
pub mod prelude;
pub mod presets;
pub mod rules;
