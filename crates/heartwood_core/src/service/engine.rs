//! Instantiation engine and the service object call convention.
//!
//! # Responsibility
//! - Validate an input mapping against an attribute contract.
//! - Populate instances from input values and declared defaults.
//! - Provide the `construct` then `call` shortcut for typed variants.
//!
//! # Invariants
//! - Presence is decided by key presence, never by truthiness.
//! - Construction is all-or-nothing: no instance on failure.
//! - Undeclared input keys never fail and are never stored.
//! - Logs carry attribute names only, never values.

use crate::contract::attribute_contract::AttributeContract;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::instance::{AttributeMap, ServiceInstance};
use log::{debug, warn};
use std::sync::Arc;

/// Validates `input` against `contract` and builds an instance.
///
/// # Errors
/// - `ServiceError::MissingRequiredAttribute` listing every required name
///   absent from `input`.
pub fn construct(
    contract: &Arc<AttributeContract>,
    input: &AttributeMap,
) -> ServiceResult<ServiceInstance> {
    let missing = contract
        .required_attrs()
        .iter()
        .filter(|name| !input.contains_key(name.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        warn!(
            "event=service_construct module=service status=error variant={} missing={}",
            contract.variant(),
            missing.join(",")
        );
        return Err(ServiceError::MissingRequiredAttribute {
            variant: contract.variant().to_string(),
            missing,
        });
    }

    let mut attributes = AttributeMap::new();
    for name in contract
        .required_attrs()
        .iter()
        .chain(contract.optional_attrs())
    {
        if let Some(value) = input.get(name.as_str()) {
            attributes.insert(name.clone(), value.clone());
        }
    }
    for (name, default) in contract.attrs_with_defaults() {
        let value = input.get(name.as_str()).unwrap_or(default);
        attributes.insert(name.clone(), value.clone());
    }

    let ignored = input
        .keys()
        .filter(|key| !contract.declares(key.as_str()))
        .count();
    debug!(
        "event=service_construct module=service status=ok variant={} attrs={} ignored={}",
        contract.variant(),
        attributes.len(),
        ignored
    );

    Ok(ServiceInstance::new(Arc::clone(contract), attributes))
}

/// A statically typed service variant.
///
/// Implementors expose a contract, adopt a validated instance, and supply
/// the call behavior. The base provides no default `call`.
pub trait ServiceObject: Sized {
    type Output;

    /// Effective contract for this variant, built once and shared.
    fn contract() -> Arc<AttributeContract>;

    /// Adopts a validated instance of this variant's contract.
    fn from_instance(instance: ServiceInstance) -> Self;

    /// Runs the variant's business logic.
    ///
    /// Not guaranteed idempotent; calling twice is the caller's concern.
    fn call(&mut self) -> Self::Output;

    /// Validates `input` and builds the variant.
    fn construct(input: &AttributeMap) -> ServiceResult<Self> {
        construct(&Self::contract(), input).map(Self::from_instance)
    }

    /// Shortcut for `construct(input)?.call()`.
    fn invoke(input: &AttributeMap) -> ServiceResult<Self::Output> {
        let mut service = Self::construct(input)?;
        Ok(service.call())
    }
}

/// Builds `S` from `input` and runs it.
pub fn call<S: ServiceObject>(input: &AttributeMap) -> ServiceResult<S::Output> {
    S::invoke(input)
}

#[cfg(test)]
mod tests {
    use super::construct;
    use crate::contract::attribute_contract::AttributeContract;
    use crate::service::error::ServiceError;
    use crate::service::instance::AttributeMap;
    use serde_json::json;
    use std::sync::Arc;

    fn input(value: serde_json::Value) -> AttributeMap {
        value.as_object().cloned().expect("test input must be an object")
    }

    #[test]
    fn reports_missing_names_in_declaration_order() {
        let contract = Arc::new(
            AttributeContract::builder("Ordered")
                .required(["z", "a", "m"])
                .build(),
        );

        let err = construct(&contract, &input(json!({ "a": 1 }))).unwrap_err();
        assert_eq!(
            err,
            ServiceError::MissingRequiredAttribute {
                variant: "Ordered".to_string(),
                missing: vec!["z".to_string(), "m".to_string()],
            }
        );
    }

    #[test]
    fn null_required_value_counts_as_present() {
        let contract = Arc::new(AttributeContract::builder("Nullable").required(["a"]).build());

        let instance = construct(&contract, &input(json!({ "a": null }))).unwrap();
        assert!(instance.contains("a"));
        assert_eq!(instance.get("a"), Some(&json!(null)));
    }

    #[test]
    fn undeclared_keys_are_not_stored() {
        let contract = Arc::new(AttributeContract::builder("Strict").optional(["a"]).build());

        let mut instance = construct(&contract, &input(json!({ "zzz": 1 }))).unwrap();
        assert!(instance.attributes().is_empty());
        assert!(!instance.set("zzz", 2));
        assert!(instance.set("a", 2));
        assert_eq!(instance.get_as::<i64>("a"), Some(2));
    }
}
