//! Resource schema display model

use serde::Serialize;
use tabled::Tabled;

use crate::resource::{FieldSchema, ResourceSchema};

/// One schema field, nested block fields flattened as `block.field`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SchemaFieldDisplay {
    #[tabled(rename = "FIELD")]
    pub name: String,

    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "PRESENCE")]
    pub presence: String,

    #[tabled(rename = "DEFAULT")]
    pub default: String,

    /// Allowed values, ranges and block limits
    #[tabled(rename = "CONSTRAINTS")]
    pub constraints: String,
}

impl SchemaFieldDisplay {
    /// Rows for every field of a schema, depth first
    pub fn rows(schema: &ResourceSchema) -> Vec<Self> {
        let mut rows = Vec::new();
        for field in &schema.fields {
            push_rows(field, None, &mut rows);
        }
        rows
    }
}

fn push_rows(field: &FieldSchema, parent: Option<&str>, rows: &mut Vec<SchemaFieldDisplay>) {
    let name = match parent {
        Some(parent) => format!("{}.{}", parent, field.name),
        None => field.name.to_string(),
    };

    let mut constraints = Vec::new();
    if let Some(values) = field.allowed_values {
        constraints.push(format!("one of [{}]", values.join(", ")));
    }
    if let Some((min, max)) = field.range {
        constraints.push(format!("{}..={}", min, max));
    }
    if let Some(max) = field.max_items {
        constraints.push(format!("max {} block", max));
    }

    rows.push(SchemaFieldDisplay {
        name: name.clone(),
        kind: field.kind.as_str().to_string(),
        presence: field.presence.as_str().to_string(),
        default: field
            .default
            .as_ref()
            .map(|v| v.to_string().trim_matches('"').to_string())
            .unwrap_or_else(|| "--".to_string()),
        constraints: if constraints.is_empty() {
            "--".to_string()
        } else {
            constraints.join("; ")
        },
    });

    for nested in &field.fields {
        push_rows(nested, Some(&name), rows);
    }
}
