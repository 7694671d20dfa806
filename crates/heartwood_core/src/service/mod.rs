//! Service objects.
//!
//! # Responsibility
//! - Validate input mappings against attribute contracts.
//! - Expose the `call` convention for typed and registered variants.
//!
//! # See also
//! - `crate::contract` for declarations.

pub mod engine;
pub mod error;
pub mod instance;
pub mod registry;
