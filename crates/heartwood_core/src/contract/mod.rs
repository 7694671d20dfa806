//! Attribute contracts.
//!
//! A contract lists the attributes a service variant requires, accepts, or
//! fills with defaults. Contracts are declared once through a builder and are
//! read-only afterwards.

pub mod attribute_contract;
pub mod declaration;
