//! Builder for JSON request bodies.
//!
//! FortiWeb distinguishes a field that is absent from a field that is
//! present but empty, so optional values are only written when the caller
//! supplied something.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::name::sanitize_name;
use crate::types::Selector;
use crate::Result;

/// Top-level fields of a JSON request body.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JsonFields {
    fields: Map<String, Value>,
}

impl JsonFields {
    /// Create a new, empty body.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Set a required field.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Into<Value>,
    {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Set a field only when the value is present and not empty.
    pub fn push_non_empty(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.fields.insert(key.to_string(), Value::from(value));
        }
    }

    /// Set a field holding a reference to another object by name.
    pub fn push_name(&mut self, key: &'static str, name: &str) {
        self.fields
            .insert(key.to_string(), Value::from(sanitize_name(name).into_owned()));
    }

    /// Set the numeric code of a selector.
    pub fn push_code<S>(&mut self, key: &'static str, selector: S)
    where
        S: Selector,
    {
        self.push(key, selector.code());
    }

    /// Set both the numeric code and the display label of a selector.
    ///
    /// Both fields come from the same value so they can never disagree.
    pub fn push_mirrored<S>(&mut self, code_key: &'static str, label_key: &'static str, selector: S)
    where
        S: Selector,
    {
        self.push(code_key, selector.code());
        self.push(label_key, selector.label());
    }

    /// Set a field from any serializable value.
    pub fn push_serialized<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.fields.insert(key.to_string(), value);
        Ok(())
    }

    /// Returns true if the field has been set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns true if no fields have been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode the body as JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// Return the body as a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
