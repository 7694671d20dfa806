use heartwood_core::{
    call, AttributeContract, AttributeMap, ServiceError, ServiceInstance, ServiceObject,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;

static MY_SERVICE: Lazy<Arc<AttributeContract>> = Lazy::new(|| {
    Arc::new(
        AttributeContract::builder("MyService")
            .required(["a", "b"])
            .optional(["c", "d"])
            .with_default("e", "some_string")
            .with_default("f", "another_string")
            .build(),
    )
});

static CALL_TEST_SERVICE: Lazy<Arc<AttributeContract>> = Lazy::new(|| {
    Arc::new(
        AttributeContract::builder("CallTestService")
            .extends(&MY_SERVICE)
            .build(),
    )
});

static REPORT_SERVICE: Lazy<Arc<AttributeContract>> = Lazy::new(|| {
    Arc::new(
        AttributeContract::builder("ReportService")
            .extends(&MY_SERVICE)
            .required(["owner"])
            .optional(["format"])
            .with_default("limit", 10)
            .build(),
    )
});

struct CallTestService {
    instance: ServiceInstance,
    calls: usize,
}

impl ServiceObject for CallTestService {
    type Output = &'static str;

    fn contract() -> Arc<AttributeContract> {
        Arc::clone(&CALL_TEST_SERVICE)
    }

    fn from_instance(instance: ServiceInstance) -> Self {
        Self { instance, calls: 0 }
    }

    fn call(&mut self) -> Self::Output {
        self.calls += 1;
        "ok"
    }
}

struct ReportService {
    instance: ServiceInstance,
}

impl ServiceObject for ReportService {
    type Output = String;

    fn contract() -> Arc<AttributeContract> {
        Arc::clone(&REPORT_SERVICE)
    }

    fn from_instance(instance: ServiceInstance) -> Self {
        Self { instance }
    }

    fn call(&mut self) -> Self::Output {
        let owner = self.instance.get_as::<String>("owner").unwrap_or_default();
        let limit = self.instance.get_as::<u32>("limit").unwrap_or_default();
        format!("{owner}:{limit}")
    }
}

fn input(value: Value) -> AttributeMap {
    value
        .as_object()
        .cloned()
        .expect("test input must be a JSON object")
}

#[test]
fn required_attrs_are_stored_in_order() {
    assert_eq!(MY_SERVICE.required_attrs(), ["a", "b"]);
}

#[test]
fn construct_fails_without_required_attrs() {
    let err = heartwood_core::construct(&MY_SERVICE, &AttributeMap::new()).unwrap_err();

    assert!(err.is_missing_required());
    assert_eq!(err.missing_attributes(), ["a", "b"]);
}

#[test]
fn construct_succeeds_with_falsy_required_values() {
    let instance =
        heartwood_core::construct(&MY_SERVICE, &input(json!({ "a": true, "b": false }))).unwrap();

    assert_eq!(instance.get("a"), Some(&json!(true)));
    assert_eq!(instance.get("b"), Some(&json!(false)));
}

#[test]
fn optional_attrs_are_stored_and_may_be_absent() {
    assert_eq!(MY_SERVICE.optional_attrs(), ["c", "d"]);

    let without =
        heartwood_core::construct(&MY_SERVICE, &input(json!({ "a": true, "b": false }))).unwrap();
    assert!(!without.contains("c"));
    assert_eq!(without.get("d"), None);

    let with = heartwood_core::construct(
        &MY_SERVICE,
        &input(json!({ "a": true, "b": false, "c": true, "d": false })),
    )
    .unwrap();
    assert_eq!(with.get("c"), Some(&json!(true)));
    assert_eq!(with.get("d"), Some(&json!(false)));
}

#[test]
fn attrs_with_defaults_are_stored_as_pairs() {
    assert_eq!(
        MY_SERVICE.attrs_with_defaults(),
        [
            ("e".to_string(), json!("some_string")),
            ("f".to_string(), json!("another_string")),
        ]
    );
}

#[test]
fn defaults_fill_absent_attributes() {
    let instance =
        heartwood_core::construct(&MY_SERVICE, &input(json!({ "a": true, "b": false }))).unwrap();

    assert_eq!(instance.get_as::<String>("e").as_deref(), Some("some_string"));
    assert_eq!(
        instance.get_as::<String>("f").as_deref(),
        Some("another_string")
    );
}

#[test]
fn defaults_are_overridden_by_key_presence() {
    let instance = heartwood_core::construct(
        &MY_SERVICE,
        &input(json!({ "a": true, "b": false, "e": true, "f": "ok" })),
    )
    .unwrap();
    assert_eq!(instance.get("e"), Some(&json!(true)));
    assert_eq!(instance.get("f"), Some(&json!("ok")));

    let falsy = heartwood_core::construct(
        &MY_SERVICE,
        &input(json!({ "a": true, "b": false, "e": false, "f": null })),
    )
    .unwrap();
    assert_eq!(falsy.get("e"), Some(&json!(false)));
    assert_eq!(falsy.get("f"), Some(&Value::Null));
}

#[test]
fn undeclared_input_keys_are_ignored() {
    let instance = heartwood_core::construct(
        &MY_SERVICE,
        &input(json!({ "a": 1, "b": 2, "unexpected": "value" })),
    )
    .unwrap();

    assert!(!instance.contains("unexpected"));
    assert_eq!(instance.attributes().len(), 4);
}

#[test]
fn derived_contract_unions_ancestor_declarations_first() {
    assert_eq!(REPORT_SERVICE.required_attrs(), ["a", "b", "owner"]);
    assert_eq!(REPORT_SERVICE.optional_attrs(), ["c", "d", "format"]);
    assert_eq!(
        REPORT_SERVICE
            .attrs_with_defaults()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>(),
        ["e", "f", "limit"]
    );
    assert_eq!(REPORT_SERVICE.lineage(), ["MyService"]);

    // Parent contract is untouched by the child's declarations.
    assert_eq!(MY_SERVICE.required_attrs(), ["a", "b"]);
}

#[test]
fn derived_variant_requires_inherited_attrs() {
    let err = ReportService::construct(&input(json!({ "owner": "ops" })))
        .err()
        .expect("inherited required attrs must be enforced");

    assert_eq!(
        err,
        ServiceError::MissingRequiredAttribute {
            variant: "ReportService".to_string(),
            missing: vec!["a".to_string(), "b".to_string()],
        }
    );
}

#[test]
fn invoke_constructs_and_calls() {
    let output = CallTestService::invoke(&input(json!({ "a": true, "b": false }))).unwrap();
    assert_eq!(output, "ok");

    let report = call::<ReportService>(&input(json!({ "a": 1, "b": 2, "owner": "ops" }))).unwrap();
    assert_eq!(report, "ops:10");
}

#[test]
fn invoke_propagates_missing_required_attribute() {
    let err = call::<CallTestService>(&input(json!({ "a": true })))
        .expect_err("missing `b` must fail before call");

    assert!(err.is_missing_required());
    assert_eq!(err.variant(), "CallTestService");
    assert_eq!(err.missing_attributes(), ["b"]);
}

#[test]
fn instance_call_is_not_limited_to_once() {
    let mut service = CallTestService::construct(&input(json!({ "a": 1, "b": 2 }))).unwrap();

    assert_eq!(service.call(), "ok");
    assert_eq!(service.call(), "ok");
    assert_eq!(service.calls, 2);
    assert_eq!(service.instance.variant(), "CallTestService");
}

#[test]
fn declared_attributes_are_writable() {
    let mut instance =
        heartwood_core::construct(&MY_SERVICE, &input(json!({ "a": 1, "b": 2 }))).unwrap();

    assert!(instance.set("c", "late"));
    assert!(instance.set("e", json!([1, 2])));
    assert!(!instance.set("zzz", 1));

    assert_eq!(instance.get_as::<String>("c").as_deref(), Some("late"));
    assert_eq!(instance.get_as::<Vec<u8>>("e"), Some(vec![1, 2]));
    assert_eq!(instance.get_as::<u8>("c"), None);
}
