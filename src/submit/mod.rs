//! Form submission: the endpoint transport and the page-wide guard

mod client;
mod error;
mod guard;
mod traits;

pub use client::HttpTransport;
pub use error::SubmitError;
pub use guard::{SubmitGuard, SubmitPermit};
pub use traits::SubmitTransport;

#[cfg(test)]
pub use traits::{MockSubmitTransport, SubmitResponse};
