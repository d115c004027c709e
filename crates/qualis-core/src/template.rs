use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::method::Method;

/// Saved, reusable selection of validation methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub validation_methods: Vec<Method>,
}

impl Template {
    /// Build a template; duplicate methods keep their first position.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
    ) -> Result<Self> {
        let mut validation_methods = Vec::new();
        for method in methods {
            if !validation_methods.contains(&method) {
                validation_methods.push(method);
            }
        }
        if validation_methods.is_empty() {
            return Err(Error::InvalidTemplate(
                "template requires at least one validation method".to_string(),
            ));
        }

        let template = Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            validation_methods,
        };
        crate::validation::validate_template(&template)?;
        Ok(template)
    }
}
