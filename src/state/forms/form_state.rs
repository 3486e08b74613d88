//! Form state and the declared form schema

use super::field::{FieldKind, FieldSchema, FormField};
use serde::{Deserialize, Serialize};

/// Flat name → value mapping posted to the endpoint
pub type FormPayload = serde_json::Map<String, serde_json::Value>;

/// Declared structure of one form on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub id: String,
    pub title: String,
    pub submit_label: String,
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// The site's contact form
    pub fn contact() -> Self {
        Self {
            id: "contact".to_string(),
            title: "Contact".to_string(),
            submit_label: "Versturen".to_string(),
            fields: vec![
                FieldSchema::new("firstName", "Voornaam", FieldKind::Text).required(),
                FieldSchema::new("lastName", "Achternaam", FieldKind::Text).required(),
                FieldSchema::new("email", "E-mailadres", FieldKind::Email).required(),
                FieldSchema::new("phone", "Telefoonnummer", FieldKind::Tel),
                FieldSchema::new("message", "Bericht", FieldKind::Textarea)
                    .required()
                    .with_min_length(10),
                FieldSchema::new(
                    "privacy",
                    "Ik ga akkoord met de privacyverklaring",
                    FieldKind::Checkbox,
                )
                .required(),
            ],
        }
    }
}

/// The form's submit control
#[derive(Debug, Clone)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
    original_label: Option<String>,
}

impl SubmitButton {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
            original_label: None,
        }
    }

    /// Disable the control and swap its label for the busy text
    pub fn enter_busy(&mut self, busy_text: &str) {
        if self.original_label.is_none() {
            self.original_label = Some(std::mem::take(&mut self.label));
        }
        self.label = busy_text.to_string();
        self.disabled = true;
    }

    /// Re-enable the control and put the original label back
    pub fn restore(&mut self) {
        if let Some(original) = self.original_label.take() {
            self.label = original;
        }
        self.disabled = false;
    }

    pub fn is_busy(&self) -> bool {
        self.original_label.is_some()
    }
}

/// A form on the page: its fields, submit control and focus
#[derive(Debug, Clone)]
pub struct SiteForm {
    pub id: String,
    pub title: String,
    pub fields: Vec<FormField>,
    pub submit: SubmitButton,
    /// Set after the first failed full-form validation
    pub validated: bool,
    pub active_field_index: usize,
}

impl SiteForm {
    pub fn from_schema(schema: &FormSchema) -> Self {
        Self {
            id: schema.id.clone(),
            title: schema.title.clone(),
            fields: schema
                .fields
                .iter()
                .cloned()
                .map(FormField::from_schema)
                .collect(),
            submit: SubmitButton::new(&schema.submit_label),
            validated: false,
            active_field_index: 0,
        }
    }

    /// Fields plus the submit row
    pub fn field_count(&self) -> usize {
        self.fields.len() + 1
    }

    pub fn active_field(&self) -> usize {
        self.active_field_index
    }

    pub fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }

    pub fn next_field(&mut self) {
        let count = self.field_count();
        self.set_active_field((self.active_field_index + 1) % count);
    }

    pub fn prev_field(&mut self) {
        if self.active_field_index == 0 {
            self.set_active_field(self.field_count() - 1);
        } else {
            self.set_active_field(self.active_field_index - 1);
        }
    }

    /// Returns true if the submit row is focused
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }

    #[cfg(test)]
    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.schema.name == name)
    }

    #[cfg(test)]
    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.schema.name == name)
    }

    #[cfg(test)]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.schema.name == name)
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.fields
            .get(self.active_field_index)
            .is_some_and(|f| f.is_multiline())
    }

    /// Serialize every field into a flat mapping; a later field with the same name wins
    pub fn to_payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        for field in &self.fields {
            if let Some(value) = field.submit_value() {
                payload.insert(
                    field.schema.name.clone(),
                    serde_json::Value::String(value.to_string()),
                );
            }
        }
        payload
    }
}
