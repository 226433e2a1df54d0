use serde::{Deserialize, Serialize};

use super::field::FieldDefinition;

/// Static description of one orderable test: request-side requirements plus
/// the ordered component fields of its report. Defined once at load, never
/// mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestTypeDefinition {
    /// Unique id, e.g. "cbc", "mri".
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Form values that must be non-empty on a test request.
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub fasting_required: bool,
    #[serde(default)]
    pub preparation_instructions: Vec<String>,
    /// Imaging types only: the patient must pick one of these.
    #[serde(default)]
    pub body_parts: Vec<String>,
    /// Ordered report components, grouped by `category` for tabbed display.
    pub components: Vec<FieldDefinition>,
}

impl TestTypeDefinition {
    pub fn component(&self, name: &str) -> Option<&FieldDefinition> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for component in &self.components {
            let category = component.category.as_str();
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }
}

/// Id + label + description, for populating a test selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestTypeSummary {
    pub key: String,
    pub name: String,
    pub description: String,
}

impl From<&TestTypeDefinition> for TestTypeSummary {
    fn from(def: &TestTypeDefinition) -> Self {
        Self {
            key: def.key.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
        }
    }
}
