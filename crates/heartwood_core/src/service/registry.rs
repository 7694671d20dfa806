//! In-process registry for dynamically discovered service variants.
//!
//! # Responsibility
//! - Keep variants addressable by name with their contracts.
//! - Resolve `extends` by name when declaring derived variants.
//! - Route `construct`/`call` by variant name.
//!
//! # Invariants
//! - Variant names are unique within one registry.
//! - A variant registered without a handler constructs normally but fails
//!   `call` with `ServiceError::CallNotImplemented`.
//! - `load_declarations` is all-or-nothing.

use crate::contract::attribute_contract::{AttributeContract, ContractBuilder};
use crate::contract::declaration::ContractDeclaration;
use crate::service::engine::{construct, ServiceObject};
use crate::service::error::ServiceError;
use crate::service::instance::{AttributeMap, ServiceInstance};
use log::{error, info};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Call behavior attached to a registered variant.
pub type CallHandler = Arc<dyn Fn(&mut ServiceInstance) -> Value + Send + Sync>;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registration and routing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateVariant(String),
    UnknownVariant(String),
    InvalidDeclaration(String),
    /// Construction or invocation failure, passed through unchanged.
    Service(ServiceError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateVariant(name) => write!(f, "variant already registered: {name}"),
            Self::UnknownVariant(name) => write!(f, "variant not registered: {name}"),
            Self::InvalidDeclaration(details) => {
                write!(f, "invalid variant declaration: {details}")
            }
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ServiceError> for RegistryError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

#[derive(Clone)]
struct RegisteredVariant {
    contract: Arc<AttributeContract>,
    handler: Option<CallHandler>,
}

/// Name-keyed service variant registry.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    variants: BTreeMap<String, RegisteredVariant>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a contract-only variant with no call behavior.
    pub fn declare(&mut self, contract: AttributeContract) -> RegistryResult<()> {
        self.insert(contract, None)
    }

    /// Registers a variant whose call behavior is `handler`.
    pub fn register_handler<F>(
        &mut self,
        contract: AttributeContract,
        handler: F,
    ) -> RegistryResult<()>
    where
        F: Fn(&mut ServiceInstance) -> Value + Send + Sync + 'static,
    {
        self.insert(contract, Some(Arc::new(handler)))
    }

    /// Registers a typed variant under its contract's name.
    pub fn register_service<S>(&mut self) -> RegistryResult<()>
    where
        S: ServiceObject + 'static,
        S::Output: Into<Value>,
    {
        let contract = S::contract();
        let handler: CallHandler = Arc::new(|instance: &mut ServiceInstance| {
            let mut service = S::from_instance(instance.clone());
            service.call().into()
        });
        self.insert_shared(contract, Some(handler))
    }

    /// Starts a builder for `variant` already extending the registered
    /// `parent`.
    pub fn builder_extending(
        &self,
        variant: &str,
        parent: &str,
    ) -> RegistryResult<ContractBuilder> {
        let parent = self.require(parent)?;
        Ok(ContractBuilder::new(variant).extends(&parent.contract))
    }

    /// Declares every variant in a JSON array of [`ContractDeclaration`]s.
    ///
    /// Declarations are applied in order, so a declaration may extend any
    /// variant registered earlier or listed before it. On error nothing is
    /// registered.
    ///
    /// Returns the declared variant names.
    pub fn load_declarations(&mut self, json: &str) -> RegistryResult<Vec<String>> {
        let declarations = ContractDeclaration::parse_list(json)
            .map_err(|err| RegistryError::InvalidDeclaration(err.to_string()))?;

        let mut staged = self.clone();
        let mut names = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let name = declaration.variant.trim().to_string();
            if name.is_empty() {
                return Err(RegistryError::InvalidDeclaration(
                    "variant name must not be empty".to_string(),
                ));
            }
            let builder = match declaration.extends.as_deref() {
                Some(parent) => staged.builder_extending(&name, parent.trim())?,
                None => ContractBuilder::new(name.as_str()),
            };
            staged.declare(declaration.apply(builder).build())?;
            names.push(name);
        }

        *self = staged;
        Ok(names)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Returns sorted variant names.
    pub fn names(&self) -> Vec<String> {
        self.variants.keys().cloned().collect()
    }

    pub fn contract(&self, variant: &str) -> Option<Arc<AttributeContract>> {
        self.variants
            .get(variant)
            .map(|entry| Arc::clone(&entry.contract))
    }

    /// Returns whether `variant` has call behavior.
    pub fn is_callable(&self, variant: &str) -> bool {
        self.variants
            .get(variant)
            .is_some_and(|entry| entry.handler.is_some())
    }

    /// Validates `input` against the named variant's contract.
    pub fn construct(
        &self,
        variant: &str,
        input: &AttributeMap,
    ) -> RegistryResult<ServiceInstance> {
        let entry = self.require(variant)?;
        Ok(construct(&entry.contract, input)?)
    }

    /// Constructs the named variant and runs its call behavior.
    ///
    /// # Errors
    /// - `UnknownVariant` when `variant` is not registered.
    /// - `Service(MissingRequiredAttribute)` when validation fails.
    /// - `Service(CallNotImplemented)` when the variant has no handler.
    pub fn call(&self, variant: &str, input: &AttributeMap) -> RegistryResult<Value> {
        let entry = self.require(variant)?;
        let mut instance = construct(&entry.contract, input)?;
        let Some(handler) = entry.handler.as_ref() else {
            error!(
                "event=service_call module=registry status=error variant={} reason=call_not_implemented",
                variant
            );
            return Err(ServiceError::CallNotImplemented {
                variant: variant.to_string(),
            }
            .into());
        };
        Ok(handler(&mut instance))
    }

    fn require(&self, variant: &str) -> RegistryResult<&RegisteredVariant> {
        self.variants
            .get(variant)
            .ok_or_else(|| RegistryError::UnknownVariant(variant.to_string()))
    }

    fn insert(
        &mut self,
        contract: AttributeContract,
        handler: Option<CallHandler>,
    ) -> RegistryResult<()> {
        self.insert_shared(Arc::new(contract), handler)
    }

    fn insert_shared(
        &mut self,
        contract: Arc<AttributeContract>,
        handler: Option<CallHandler>,
    ) -> RegistryResult<()> {
        let name = contract.variant().to_string();
        if self.variants.contains_key(name.as_str()) {
            return Err(RegistryError::DuplicateVariant(name));
        }

        info!(
            "event=variant_register module=registry status=ok variant={} callable={} attrs={}",
            name,
            handler.is_some(),
            contract.attribute_names().count()
        );
        self.variants.insert(name, RegisteredVariant { contract, handler });
        Ok(())
    }
}
