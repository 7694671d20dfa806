//! Constructed service instance and its attribute bag.
//!
//! # Invariants
//! - Every required attribute of the contract is present.
//! - Every defaulted attribute is present.
//! - Optional attributes are present only when the input carried the key.
//! - Only declared names are ever stored.

use crate::contract::attribute_contract::AttributeContract;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Input mapping and attribute storage: attribute name to value.
pub type AttributeMap = Map<String, Value>;

/// Validated, populated attribute set for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInstance {
    contract: Arc<AttributeContract>,
    attributes: AttributeMap,
}

impl ServiceInstance {
    /// Wraps attributes that already satisfy `contract`.
    ///
    /// Only the engine builds instances, after validation.
    pub(crate) fn new(contract: Arc<AttributeContract>, attributes: AttributeMap) -> Self {
        Self {
            contract,
            attributes,
        }
    }

    pub fn variant(&self) -> &str {
        self.contract.variant()
    }

    pub fn contract(&self) -> &AttributeContract {
        &self.contract
    }

    /// Returns the raw value of `name`, or `None` when it is unset.
    ///
    /// A present `null` reads as `Some(&Value::Null)`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Reads `name` as `T`.
    ///
    /// Returns `None` when the attribute is unset or does not deserialize
    /// into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.attributes
            .get(name)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// Returns whether `name` carries a value, `null` included.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Overwrites a declared attribute.
    ///
    /// Returns `false` and stores nothing when `name` is not declared by the
    /// contract.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        if !self.contract.declares(name) {
            return false;
        }
        self.attributes.insert(name.to_string(), value.into());
        true
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}
