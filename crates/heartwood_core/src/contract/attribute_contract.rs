//! Attribute contract descriptor and builder.
//!
//! # Responsibility
//! - Collect required/optional/default attribute declarations for one variant.
//! - Resolve the ancestor chain once and freeze the effective sets.
//!
//! # Invariants
//! - Effective sets list ancestor declarations before descendant declarations.
//! - Each name appears at most once per set; repeated declarations are no-ops.
//! - A redeclared default keeps its first position and takes the newest value.
//! - A built contract is immutable.

use serde::Serialize;
use serde_json::Value;

/// Frozen attribute contract for one service variant.
///
/// All accessors return *effective* declarations: the variant's own
/// declarations unioned with every ancestor's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeContract {
    variant: String,
    lineage: Vec<String>,
    required: Vec<String>,
    optional: Vec<String>,
    defaults: Vec<(String, Value)>,
}

impl AttributeContract {
    /// Starts declaring a contract for `variant`.
    pub fn builder(variant: impl Into<String>) -> ContractBuilder {
        ContractBuilder::new(variant)
    }

    /// Variant name this contract belongs to.
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Ancestor variant names, root first. Empty for a root variant.
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    /// Names that must be present in every input mapping.
    pub fn required_attrs(&self) -> &[String] {
        &self.required
    }

    /// Names that may be absent from an input mapping.
    pub fn optional_attrs(&self) -> &[String] {
        &self.optional
    }

    /// `(name, default)` pairs in declaration order.
    pub fn attrs_with_defaults(&self) -> &[(String, Value)] {
        &self.defaults
    }

    /// Returns the declared default for `name`, if any.
    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.defaults
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, value)| value)
    }

    /// Returns whether `name` appears in any of the three declaration lists.
    pub fn declares(&self, name: &str) -> bool {
        self.attribute_names().any(|declared| declared == name)
    }

    /// Iterates required, optional, then defaulted names.
    ///
    /// A name declared in more than one list is yielded once per list.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
            .chain(self.defaults.iter().map(|(name, _)| name.as_str()))
    }

    /// Returns whether `ancestor` is this variant or one of its ancestors.
    pub fn is_a(&self, ancestor: &str) -> bool {
        self.variant == ancestor || self.lineage.iter().any(|name| name == ancestor)
    }
}

/// Declaration-time builder for [`AttributeContract`].
#[derive(Debug, Clone)]
pub struct ContractBuilder {
    variant: String,
    parent: Option<AttributeContract>,
    required: Vec<String>,
    optional: Vec<String>,
    defaults: Vec<(String, Value)>,
}

impl ContractBuilder {
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            parent: None,
            required: Vec::new(),
            optional: Vec::new(),
            defaults: Vec::new(),
        }
    }

    /// Inherits every effective declaration of `parent`.
    ///
    /// Calling this twice replaces the earlier parent; a variant has one
    /// ancestor chain.
    pub fn extends(mut self, parent: &AttributeContract) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Declares names that must be present at construction.
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            push_unique(&mut self.required, name.into());
        }
        self
    }

    /// Declares names that may be absent at construction.
    pub fn optional<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            push_unique(&mut self.optional, name.into());
        }
        self
    }

    /// Declares one attribute that falls back to `value` when absent.
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        upsert_default(&mut self.defaults, name.into(), value.into());
        self
    }

    /// Resolves the ancestor chain and freezes the effective contract.
    pub fn build(self) -> AttributeContract {
        let (lineage, mut required, mut optional, mut defaults) = match self.parent {
            Some(parent) => {
                let mut lineage = parent.lineage;
                lineage.push(parent.variant);
                (lineage, parent.required, parent.optional, parent.defaults)
            }
            None => (Vec::new(), Vec::new(), Vec::new(), Vec::new()),
        };

        for name in self.required {
            push_unique(&mut required, name);
        }
        for name in self.optional {
            push_unique(&mut optional, name);
        }
        for (name, value) in self.defaults {
            upsert_default(&mut defaults, name, value);
        }

        AttributeContract {
            variant: self.variant,
            lineage,
            required,
            optional,
            defaults,
        }
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

fn upsert_default(defaults: &mut Vec<(String, Value)>, name: String, value: Value) {
    match defaults.iter_mut().find(|(declared, _)| *declared == name) {
        Some(slot) => slot.1 = value,
        None => defaults.push((name, value)),
    }
}
