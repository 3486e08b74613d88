//! Form field value objects

use serde::{Deserialize, Serialize};

/// Submit value of a checked checkbox
pub const CHECKBOX_VALUE: &str = "on";

/// Textarea minimum length when the schema does not override it
pub const DEFAULT_MIN_LENGTH: usize = 10;

/// Identifiers that mark a field as a person's first or last name
const PERSON_NAME_IDS: &[&str] = &["firstName", "lastName"];

/// Semantic kind of a field, declared by the form schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Checkbox,
    Textarea,
    Other,
}

/// Declared constraints of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Key used when the form is serialized
    pub name: String,
    /// Stable identifier, defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Minimum length for textareas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

impl FieldSchema {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            id: None,
            label: label.to_string(),
            kind,
            required: false,
            min_length: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// The field's stable identifier
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Whether the human-name rule applies to this field
    pub fn is_person_name(&self) -> bool {
        PERSON_NAME_IDS
            .iter()
            .any(|candidate| self.id() == *candidate || self.name == *candidate)
    }

    /// Minimum textarea length; zero or missing falls back to the default
    pub fn effective_min_length(&self) -> usize {
        self.min_length
            .filter(|min| *min > 0)
            .unwrap_or(DEFAULT_MIN_LENGTH)
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checkbox(bool),
}

/// The single error line shown under a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub visible: bool,
}

/// Represents a single form field with its schema, value and error presentation
#[derive(Debug, Clone)]
pub struct FormField {
    pub schema: FieldSchema,
    pub value: FieldValue,
    invalid: bool,
    feedback: Option<Feedback>,
}

impl FormField {
    /// Create an empty field from its schema
    pub fn from_schema(schema: FieldSchema) -> Self {
        let value = match schema.kind {
            FieldKind::Checkbox => FieldValue::Checkbox(false),
            _ => FieldValue::Text(String::new()),
        };
        Self {
            schema,
            value,
            invalid: false,
            feedback: None,
        }
    }

    /// Create a text field with an initial value
    #[cfg(test)]
    pub fn with_text(schema: FieldSchema, text: &str) -> Self {
        let mut field = Self::from_schema(schema);
        field.set_text(text);
        field
    }

    pub fn kind(&self) -> FieldKind {
        self.schema.kind
    }

    pub fn is_multiline(&self) -> bool {
        self.schema.kind == FieldKind::Textarea
    }

    /// Raw value as the form would report it; checkboxes report their submit value
    pub fn raw_value(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Checkbox(_) => CHECKBOX_VALUE,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.value, FieldValue::Checkbox(true))
    }

    /// Value included in the submitted payload; unchecked checkboxes are omitted
    pub fn submit_value(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Text(s) => Some(s),
            FieldValue::Checkbox(true) => Some(CHECKBOX_VALUE),
            FieldValue::Checkbox(false) => None,
        }
    }

    /// Set the text value (ignored for checkboxes)
    pub fn set_text(&mut self, text: &str) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = text.to_string();
        }
    }

    #[cfg(test)]
    pub fn set_checked(&mut self, checked: bool) {
        if let FieldValue::Checkbox(c) = &mut self.value {
            *c = checked;
        }
    }

    pub fn toggle(&mut self) {
        if let FieldValue::Checkbox(c) = &mut self.value {
            *c = !*c;
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        } else if c == ' ' {
            self.toggle();
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Checkbox(c) => *c = false,
        }
    }

    /// Mark the field invalid and show `message` in its feedback line.
    ///
    /// The feedback line is created on first use and reused afterwards, so a
    /// field never carries more than one.
    pub fn show_error(&mut self, message: &str) {
        self.invalid = true;
        let feedback = self.feedback.get_or_insert_with(|| Feedback {
            text: String::new(),
            visible: false,
        });
        feedback.text = message.to_string();
        feedback.visible = true;
    }

    /// Drop the invalid marking and hide the feedback line
    pub fn clear_error(&mut self) {
        self.invalid = false;
        if let Some(feedback) = &mut self.feedback {
            feedback.visible = false;
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// The error text currently displayed, if any
    pub fn visible_error(&self) -> Option<&str> {
        self.feedback
            .as_ref()
            .filter(|f| f.visible)
            .map(|f| f.text.as_str())
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Checkbox(true) => "[x]".to_string(),
            FieldValue::Checkbox(false) => "[ ]".to_string(),
        }
    }
}
