//! Serialized contract declarations for dynamically discovered variants.

use crate::contract::attribute_contract::ContractBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One variant declaration as read from JSON.
///
/// `defaults` is a list of `[name, value]` pairs so declaration order
/// survives the round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractDeclaration {
    pub variant: String,
    /// Parent variant name, resolved by the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
    #[serde(default)]
    pub defaults: Vec<(String, Value)>,
}

impl ContractDeclaration {
    /// Applies this declaration's own lists onto `builder`.
    ///
    /// `extends` is ignored here; the caller resolves the parent first.
    pub fn apply(self, builder: ContractBuilder) -> ContractBuilder {
        let builder = builder.required(self.required).optional(self.optional);
        self.defaults
            .into_iter()
            .fold(builder, |builder, (name, value)| {
                builder.with_default(name, value)
            })
    }

    /// Parses a JSON array of declarations.
    pub fn parse_list(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
