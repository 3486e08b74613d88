//! Form domain layer
//!
//! Declared field schemas, field values with their error presentation, the
//! validation rules and the per-form state.

mod field;
mod form_state;
mod validation;

pub use field::{FieldKind, FieldSchema, FormField};
pub use form_state::{FormPayload, FormSchema, SiteForm, SubmitButton};
pub use validation::validate;
