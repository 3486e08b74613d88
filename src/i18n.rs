//! Localized user-facing text
//!
//! The site is Dutch; English is available for non-Dutch deployments.

use serde::{Deserialize, Serialize};

/// Supported site languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Nl,
    En,
}

impl Locale {
    /// Get the message catalog for this locale
    pub fn catalog(self) -> &'static Catalog {
        match self {
            Locale::Nl => &NL,
            Locale::En => &EN,
        }
    }
}

/// Every string the form layer shows to a visitor
#[derive(Debug)]
pub struct Catalog {
    pub required: &'static str,
    pub invalid_email: &'static str,
    pub invalid_phone: &'static str,
    pub invalid_name: &'static str,
    /// `{min}` is replaced with the field's minimum length
    pub too_short: &'static str,
    pub must_agree: &'static str,
    pub check_fields: &'static str,
    pub sending: &'static str,
    pub sent: &'static str,
    pub transport_failed: &'static str,
    pub generic_failure: &'static str,
    pub close: &'static str,
    pub thank_you_title: &'static str,
    pub thank_you_body: &'static str,
}

impl Catalog {
    /// Render the minimum-length message for `min` characters
    pub fn too_short(&self, min: usize) -> String {
        self.too_short.replace("{min}", &min.to_string())
    }
}

static NL: Catalog = Catalog {
    required: "Dit veld is verplicht",
    invalid_email: "Voer een geldig e-mailadres in",
    invalid_phone: "Voer een geldig telefoonnummer in",
    invalid_name: "Voer een geldige naam in",
    too_short: "Bericht moet minimaal {min} tekens bevatten",
    must_agree: "U moet akkoord gaan om verder te gaan",
    check_fields: "Controleer de formuliervelden",
    sending: "Verzenden...",
    sent: "Bedankt! Uw bericht is verzonden.",
    transport_failed: "Uw aanvraag kon niet worden verzonden. Controleer uw internetverbinding en probeer het opnieuw.",
    generic_failure: "Er is iets misgegaan. Probeer het later opnieuw.",
    close: "Sluiten",
    thank_you_title: "Bedankt!",
    thank_you_body: "We hebben uw bericht ontvangen en nemen zo snel mogelijk contact met u op.",
};

static EN: Catalog = Catalog {
    required: "This field is required",
    invalid_email: "Please enter a valid email address",
    invalid_phone: "Please enter a valid phone number",
    invalid_name: "Please enter a valid name",
    too_short: "Message must be at least {min} characters",
    must_agree: "You must agree to continue",
    check_fields: "Please check the form fields",
    sending: "Sending...",
    sent: "Thank you! Your message has been sent.",
    transport_failed: "Your request could not be sent. Check your internet connection and try again.",
    generic_failure: "Something went wrong. Please try again later.",
    close: "Close",
    thank_you_title: "Thank you!",
    thank_you_body: "We received your message and will get back to you as soon as possible.",
};
