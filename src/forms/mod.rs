//! Decoding and validation of the submitted HTML forms.
//!
//! Each form keeps the raw strings the visitor typed, so a rejected
//! submission can be shown again as entered, and converts into a model
//! record only through a validating `to_*` method.

use serde::Deserialize;

pub mod blog_form;
pub mod certification_form;
pub mod contact_form;
pub mod profile_form;

pub use blog_form::BlogForm;
pub use certification_form::CertificationForm;
pub use contact_form::ContactForm;
pub use profile_form::ProfileForm;

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
