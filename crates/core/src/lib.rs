//! # Orders Core
//!
//! Domain model and validation for incoming patient orders.
//!
//! Handles:
//! - Discriminated-union validation of raw JSON payloads ([`validation`])
//! - The typed [`Order`] / [`Patient`] model produced by a successful validation
//! - Formatting the acknowledgement returned to API clients ([`acknowledge`])
//!
//! Nothing in this crate performs I/O; the REST and CLI front ends own transport concerns.

#![warn(rust_2018_idioms)]

pub mod constants;
pub mod error;
pub mod order;
pub mod validation;

pub use error::{Constraint, FieldViolation, ValidationError, ValidationResult};
pub use order::{acknowledge, Order, Patient, PATIENT_UNION};
pub use validation::{DiscriminatedUnion, FieldPath, ValidatedVariant, VariantSchema};
