//! Reusable UI components

mod button;
mod toast;

pub use button::{render_submit_button, BUTTON_HEIGHT};
pub use toast::draw_toasts;
