//! Schema declaration for the Spectrum application resource
//!
//! The schema is a process-wide constant describing every field of the
//! declared configuration: presence, kind, defaults and value constraints.
//! It drives default filling and validation of user documents, and checks
//! individual values written back into local state during refresh.

use std::sync::LazyLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ResourceError;

/// Resource type name as exposed to users
pub const RESOURCE_TYPE: &str = "cloudflare_spectrum_app";

pub const TLS_ON: &str = "on";
pub const TLS_OFF: &str = "off";

static SPECTRUM_APP_SCHEMA: LazyLock<ResourceSchema> = LazyLock::new(|| ResourceSchema {
    type_name: RESOURCE_TYPE,
    version: 0,
    fields: vec![
        FieldSchema::required("zone_id", FieldKind::String),
        FieldSchema::required("protocol", FieldKind::String),
        FieldSchema::required("dns", FieldKind::Block).with_block(vec![
            FieldSchema::required("type", FieldKind::String),
            FieldSchema::required("name", FieldKind::String),
        ]),
        FieldSchema::optional("origin_direct", FieldKind::StringList),
        FieldSchema::optional("origin_dns", FieldKind::Block)
            .with_block(vec![FieldSchema::required("name", FieldKind::String)]),
        FieldSchema::optional("origin_port", FieldKind::Int).in_range(1, 65535),
        FieldSchema::optional("tls", FieldKind::String)
            .with_default(Value::from(TLS_OFF))
            .one_of(&[TLS_ON, TLS_OFF]),
        FieldSchema::optional("ip_firewall", FieldKind::Bool).with_default(Value::Bool(true)),
        FieldSchema::optional("proxy_protocol", FieldKind::Bool).with_default(Value::Bool(false)),
        FieldSchema::computed("created_on", FieldKind::String),
        FieldSchema::computed("modified_on", FieldKind::String),
    ],
});

/// The Spectrum application schema. Identical across calls.
pub fn spectrum_app_schema() -> &'static ResourceSchema {
    &SPECTRUM_APP_SCHEMA
}

/// Value kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Int,
    Bool,
    StringList,
    /// Single nested object described by `FieldSchema::fields`
    Block,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Bool => "bool",
            FieldKind::StringList => "list(string)",
            FieldKind::Block => "block",
        }
    }
}

/// Who sets a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Must be set by the user
    Required,
    /// May be set by the user
    Optional,
    /// Set by the remote system only
    Computed,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Required => "required",
            Presence::Optional => "optional",
            Presence::Computed => "computed",
        }
    }
}

/// Declaration of a single field
#[derive(Debug, Clone, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(i64, i64)>,
    /// Blocks accept a list of at most this many objects in documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSchema>,
}

impl FieldSchema {
    fn new(name: &'static str, kind: FieldKind, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            default: None,
            allowed_values: None,
            range: None,
            max_items: None,
            fields: Vec::new(),
        }
    }

    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Presence::Required)
    }

    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Presence::Optional)
    }

    pub fn computed(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Presence::Computed)
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed_values = Some(values);
        self
    }

    pub fn in_range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn with_block(mut self, fields: Vec<FieldSchema>) -> Self {
        self.max_items = Some(1);
        self.fields = fields;
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// Check one value for this field. `Value::Null` means unset.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        let mut problems = Vec::new();
        self.collect_violations(value, self.name, &mut problems);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    fn collect_violations(&self, value: &Value, path: &str, out: &mut Vec<String>) {
        let unset = match value {
            Value::Null => true,
            Value::String(s) => s.is_empty() && self.is_required(),
            _ => false,
        };
        if unset {
            if self.is_required() {
                out.push(format!("{} is required", path));
            }
            return;
        }

        match self.kind {
            FieldKind::String => {
                let Some(s) = value.as_str() else {
                    out.push(format!("{} must be a string", path));
                    return;
                };
                if let Some(allowed) = self.allowed_values {
                    if !allowed.contains(&s) {
                        out.push(format!(
                            "expected {} to be one of [{}], got {}",
                            path,
                            allowed.join(" "),
                            s
                        ));
                    }
                }
            }
            FieldKind::Int => {
                let Some(n) = value.as_i64() else {
                    out.push(format!("{} must be an integer", path));
                    return;
                };
                if let Some((min, max)) = self.range {
                    if n < min || n > max {
                        out.push(format!(
                            "expected {} to be in the range ({} - {}), got {}",
                            path, min, max, n
                        ));
                    }
                }
            }
            FieldKind::Bool => {
                if !value.is_boolean() {
                    out.push(format!("{} must be a boolean", path));
                }
            }
            FieldKind::StringList => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if !item.is_string() {
                            out.push(format!("{}.{} must be a string", path, i));
                        }
                    }
                }
                None => out.push(format!("{} must be a list of strings", path)),
            },
            FieldKind::Block => {
                let Some(obj) = value.as_object() else {
                    out.push(format!("{} must be a single block", path));
                    return;
                };
                for key in obj.keys() {
                    if !self.fields.iter().any(|f| f.name == key) {
                        out.push(format!("{}.{} is not a supported argument", path, key));
                    }
                }
                for nested in &self.fields {
                    let nested_path = format!("{}.{}", path, nested.name);
                    let nested_value = obj.get(nested.name).unwrap_or(&Value::Null);
                    nested.collect_violations(nested_value, &nested_path, out);
                }
            }
        }
    }
}

/// Declaration of a whole resource
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub version: u32,
    pub fields: Vec<FieldSchema>,
}

impl ResourceSchema {
    /// Look up a top-level field
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fill defaults for unset optional fields
    pub fn apply_defaults(&self, document: &mut Map<String, Value>) {
        for field in &self.fields {
            let Some(default) = &field.default else {
                continue;
            };
            let unset = document.get(field.name).is_none_or(Value::is_null);
            if unset {
                document.insert(field.name.to_string(), default.clone());
            }
        }
    }

    /// Accept blocks written as lists, the shape used by list-based
    /// configuration languages. An empty list is the same as leaving the
    /// block unset.
    pub fn collapse_blocks(&self, document: &mut Map<String, Value>) {
        for field in self.fields.iter().filter(|f| f.kind == FieldKind::Block) {
            let Some(Value::Array(items)) = document.get_mut(field.name) else {
                continue;
            };
            match items.len() {
                0 => {
                    document.remove(field.name);
                }
                1 => {
                    let item = items.remove(0);
                    document.insert(field.name.to_string(), item);
                }
                _ => {}
            }
        }
    }

    /// Validate a user-declared document, reporting every violation at once
    pub fn validate(&self, document: &Map<String, Value>) -> Result<(), ResourceError> {
        let mut problems = Vec::new();

        for key in document.keys() {
            match self.field(key) {
                None => problems.push(format!("{} is not a supported argument", key)),
                Some(f) if f.presence == Presence::Computed && !document[key].is_null() => {
                    problems.push(format!("{} is computed and cannot be set", key));
                }
                Some(_) => {}
            }
        }

        for field in self.fields.iter().filter(|f| f.presence != Presence::Computed) {
            let value = document.get(field.name).unwrap_or(&Value::Null);
            match (field.kind, value.as_array()) {
                (FieldKind::Block, Some(items)) if items.is_empty() => {
                    field.collect_violations(&Value::Null, field.name, &mut problems);
                }
                (FieldKind::Block, Some(items)) => problems.push(format!(
                    "{} accepts at most {} block(s), got {}",
                    field.name,
                    field.max_items.unwrap_or(1),
                    items.len()
                )),
                _ => field.collect_violations(value, field.name, &mut problems),
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ResourceError::Validation(problems.join("; ")))
        }
    }

    /// Collapse blocks, fill defaults, validate and decode a document
    pub fn decode<T: DeserializeOwned>(&self, document: Value) -> Result<T, ResourceError> {
        let Value::Object(mut map) = document else {
            return Err(ResourceError::Validation(format!(
                "{} configuration must be a mapping",
                self.type_name
            )));
        };

        self.collapse_blocks(&mut map);
        self.apply_defaults(&mut map);
        self.validate(&map)?;

        serde_json::from_value(Value::Object(map))
            .map_err(|e| ResourceError::Validation(e.to_string()))
    }

    /// Re-run defaults and validation on an already typed configuration
    pub fn prepare<T: Serialize + DeserializeOwned>(&self, config: &T) -> Result<T, ResourceError> {
        let document =
            serde_json::to_value(config).map_err(|e| ResourceError::Validation(e.to_string()))?;
        self.decode(document)
    }
}
