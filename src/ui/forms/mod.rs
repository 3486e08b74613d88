//! Form rendering module
//!
//! - `field_renderer`: Field rendering with validation feedback
//! - `form_view`: The form page with its submit control

mod field_renderer;
mod form_view;

pub use form_view::draw_form;
