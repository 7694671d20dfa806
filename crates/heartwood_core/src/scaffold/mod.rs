//! Scaffolding for new service files.
//!
//! Turns a free-text name into a file stem and a type name, then writes a
//! populated service template under the services directory.

pub mod generator;
pub mod inflection;
pub mod naming;
