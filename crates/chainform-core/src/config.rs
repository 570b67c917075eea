//! Form conversion configuration.

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::label::{field_label_with, UNNAMED_ARGUMENT};
use crate::types::{MethodInput, DEFAULT_SEPARATOR};

/// Settings for the form ↔ argument conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Path separator used in form field keys
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Largest array index a form key may address. Unlimited when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_index: Option<usize>,
    /// Label text for an argument with neither name nor internal type
    #[serde(default = "default_unnamed_placeholder")]
    pub unnamed_placeholder: String,
}

fn default_separator() -> char { DEFAULT_SEPARATOR }
fn default_unnamed_placeholder() -> String { UNNAMED_ARGUMENT.to_string() }

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            max_index: None,
            unnamed_placeholder: default_unnamed_placeholder(),
        }
    }
}

impl FormConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// A digit separator would make `"1:0"` and `"10"` indistinguishable.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.separator.is_ascii_digit() {
            return Err(FormError::InvalidConfig {
                reason: format!("separator '{}' must not be a digit", self.separator),
            });
        }
        if self.unnamed_placeholder.is_empty() {
            return Err(FormError::InvalidConfig {
                reason: "unnamed_placeholder must not be empty".into(),
            });
        }
        Ok(())
    }

    /// [`crate::field_label`] with this config's placeholder.
    pub fn field_label(&self, input: &MethodInput, is_required: bool) -> String {
        field_label_with(input, is_required, &self.unnamed_placeholder)
    }
}
