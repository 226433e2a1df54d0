//! Test type registry — immutable shared configuration mapping a test-type
//! key to its request requirements and report components.
//!
//! The catalogue ships as a bundled JSON data file; adding a test type means
//! appending an entry there, with no code change to the validator or the
//! sessions. All lookups return empty defaults for unknown keys.

use std::sync::LazyLock;

use thiserror::Error;

use crate::models::{FieldDefinition, TestTypeDefinition, TestTypeSummary};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid registry JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Duplicate test type key: {key}")]
    DuplicateKey { key: String },

    #[error("Select field {field} in {test_type} has no options")]
    EmptyOptions { test_type: String, field: String },

    #[error("Field {field} in {test_type} has min_value {min} above max_value {max}")]
    InvalidBounds {
        test_type: String,
        field: String,
        min: f64,
        max: f64,
    },

    #[error("Unknown test type: {key}")]
    UnknownTestType { key: String },
}

static BUNDLED: LazyLock<Registry> = LazyLock::new(|| {
    Registry::from_json(include_str!("../resources/test_types.json"))
        .expect("bundled test_types.json is valid")
});

/// The loaded catalogue. Read-only after construction; safe to share.
#[derive(Debug, Clone)]
pub struct Registry {
    types: Vec<TestTypeDefinition>,
}

impl Registry {
    /// Parse and validate a catalogue. Invariants checked here so the rest
    /// of the crate can trust them: unique keys, non-empty options on select
    /// fields, min_value ≤ max_value.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let types: Vec<TestTypeDefinition> = serde_json::from_str(json)?;

        for (i, def) in types.iter().enumerate() {
            if types[..i].iter().any(|other| other.key == def.key) {
                return Err(RegistryError::DuplicateKey {
                    key: def.key.clone(),
                });
            }
            for field in &def.components {
                if field.field_type == crate::models::FieldType::Select && field.options.is_empty()
                {
                    return Err(RegistryError::EmptyOptions {
                        test_type: def.key.clone(),
                        field: field.name.clone(),
                    });
                }
                if let (Some(min), Some(max)) = (field.min_value, field.max_value) {
                    if min > max {
                        return Err(RegistryError::InvalidBounds {
                            test_type: def.key.clone(),
                            field: field.name.clone(),
                            min,
                            max,
                        });
                    }
                }
            }
        }

        tracing::debug!(test_types = types.len(), "Registry loaded");
        Ok(Self { types })
    }

    /// The catalogue bundled with the crate.
    pub fn bundled() -> &'static Registry {
        &BUNDLED
    }

    pub fn get(&self, key: &str) -> Option<&TestTypeDefinition> {
        self.types.iter().find(|t| t.key == key)
    }

    /// Id + label + description for every test type, in catalogue order.
    pub fn all_types(&self) -> Vec<TestTypeSummary> {
        self.types.iter().map(TestTypeSummary::from).collect()
    }

    pub fn required_fields(&self, key: &str) -> &[String] {
        self.get(key).map_or(&[], |t| &t.required_fields)
    }

    pub fn components(&self, key: &str) -> &[FieldDefinition] {
        self.get(key).map_or(&[], |t| &t.components)
    }

    pub fn is_fasting_required(&self, key: &str) -> bool {
        self.get(key).is_some_and(|t| t.fasting_required)
    }

    pub fn preparation_instructions(&self, key: &str) -> &[String] {
        self.get(key).map_or(&[], |t| &t.preparation_instructions)
    }

    pub fn body_parts(&self, key: &str) -> &[String] {
        self.get(key).map_or(&[], |t| &t.body_parts)
    }
}
