use heartwood_core::{
    AttributeContract, AttributeMap, RegistryError, ServiceError, ServiceInstance, ServiceObject,
    ServiceRegistry,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;

static GREETING: Lazy<Arc<AttributeContract>> = Lazy::new(|| {
    Arc::new(
        AttributeContract::builder("GreetingService")
            .required(["name"])
            .with_default("punctuation", "!")
            .build(),
    )
});

struct GreetingService {
    instance: ServiceInstance,
}

impl ServiceObject for GreetingService {
    type Output = String;

    fn contract() -> Arc<AttributeContract> {
        Arc::clone(&GREETING)
    }

    fn from_instance(instance: ServiceInstance) -> Self {
        Self { instance }
    }

    fn call(&mut self) -> Self::Output {
        let name = self.instance.get_as::<String>("name").unwrap_or_default();
        let punctuation = self
            .instance
            .get_as::<String>("punctuation")
            .unwrap_or_default();
        format!("hello {name}{punctuation}")
    }
}

fn input(value: Value) -> AttributeMap {
    value
        .as_object()
        .cloned()
        .expect("test input must be a JSON object")
}

fn my_service_contract() -> AttributeContract {
    AttributeContract::builder("MyService")
        .required(["a", "b"])
        .optional(["c", "d"])
        .with_default("e", "some_string")
        .with_default("f", "another_string")
        .build()
}

#[test]
fn declared_variant_without_call_fails_with_call_not_implemented() {
    let mut registry = ServiceRegistry::new();
    registry.declare(my_service_contract()).unwrap();

    let err = registry
        .call("MyService", &input(json!({ "a": true, "b": false })))
        .expect_err("contract-only variant must not be callable");

    assert_eq!(
        err,
        RegistryError::Service(ServiceError::CallNotImplemented {
            variant: "MyService".to_string(),
        })
    );
    assert!(!registry.is_callable("MyService"));
}

#[test]
fn missing_attributes_take_precedence_over_missing_call() {
    let mut registry = ServiceRegistry::new();
    registry.declare(my_service_contract()).unwrap();

    let err = registry
        .call("MyService", &AttributeMap::new())
        .expect_err("missing attributes must fail");

    match err {
        RegistryError::Service(service_err) => {
            assert!(service_err.is_missing_required());
            assert!(!service_err.is_call_not_implemented());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn declared_variant_still_constructs() {
    let mut registry = ServiceRegistry::new();
    registry.declare(my_service_contract()).unwrap();

    let instance = registry
        .construct("MyService", &input(json!({ "a": 1, "b": 2 })))
        .unwrap();
    assert_eq!(instance.get("e"), Some(&json!("some_string")));
}

#[test]
fn handler_variant_returns_handler_output() {
    let mut registry = ServiceRegistry::new();
    let contract = AttributeContract::builder("CallTestService")
        .extends(&my_service_contract())
        .build();
    registry
        .register_handler(contract, |instance| {
            assert!(instance.set("c", "touched"));
            json!("ok")
        })
        .unwrap();

    let output = registry
        .call("CallTestService", &input(json!({ "a": true, "b": false })))
        .unwrap();
    assert_eq!(output, json!("ok"));
}

#[test]
fn typed_service_registers_under_contract_name() {
    let mut registry = ServiceRegistry::new();
    registry.register_service::<GreetingService>().unwrap();

    assert_eq!(registry.names(), ["GreetingService"]);
    assert!(registry.is_callable("GreetingService"));
    assert_eq!(
        registry
            .call("GreetingService", &input(json!({ "name": "ada" })))
            .unwrap(),
        json!("hello ada!")
    );
    assert!(Arc::ptr_eq(
        &registry.contract("GreetingService").unwrap(),
        &GreetingService::contract()
    ));
}

#[test]
fn unknown_variant_is_reported() {
    let registry = ServiceRegistry::new();
    let err = registry
        .call("Nope", &AttributeMap::new())
        .expect_err("unknown variant must fail");
    assert_eq!(err, RegistryError::UnknownVariant("Nope".to_string()));
    assert!(registry.contract("Nope").is_none());
}

#[test]
fn builder_extending_resolves_parent_by_name() {
    let mut registry = ServiceRegistry::new();
    registry.declare(my_service_contract()).unwrap();

    let child = registry
        .builder_extending("AuditService", "MyService")
        .unwrap()
        .required(["actor"])
        .build();

    assert_eq!(child.required_attrs(), ["a", "b", "actor"]);
    assert_eq!(child.lineage(), ["MyService"]);
}

#[test]
fn load_declarations_resolves_extends_in_order() {
    let mut registry = ServiceRegistry::new();
    let names = registry
        .load_declarations(
            r#"[
                {"variant": "Base", "required": ["a"], "defaults": [["e", "x"]]},
                {"variant": "Child", "extends": "Base", "optional": ["c"], "defaults": [["e", false]]}
            ]"#,
        )
        .unwrap();

    assert_eq!(names, ["Base", "Child"]);
    let child = registry.contract("Child").unwrap();
    assert_eq!(child.required_attrs(), ["a"]);
    assert_eq!(child.optional_attrs(), ["c"]);
    assert_eq!(child.default_for("e"), Some(&json!(false)));

    let err = registry
        .call("Child", &input(json!({ "a": 1 })))
        .expect_err("loaded variants have no call behavior");
    assert!(matches!(
        err,
        RegistryError::Service(ServiceError::CallNotImplemented { .. })
    ));
}

#[test]
fn load_declarations_is_all_or_nothing() {
    let mut registry = ServiceRegistry::new();
    let err = registry
        .load_declarations(
            r#"[
                {"variant": "First"},
                {"variant": "Orphan", "extends": "Missing"}
            ]"#,
        )
        .expect_err("unknown parent must fail");

    assert_eq!(err, RegistryError::UnknownVariant("Missing".to_string()));
    assert!(registry.is_empty());
}

#[test]
fn load_declarations_rejects_malformed_json() {
    let mut registry = ServiceRegistry::new();
    let err = registry
        .load_declarations(r#"{"variant": "NotAList"}"#)
        .expect_err("object instead of list must fail");
    assert!(matches!(err, RegistryError::InvalidDeclaration(_)));
}
