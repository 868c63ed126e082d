use spdlog::info;

use crate::error::{Result, ValidationError};
use crate::forms::ContactForm;
use crate::model::ContactMessage;
use crate::store::Collection;

pub const NOT_CONFIGURED_MESSAGE: &str = "Contact service is not configured. Please reach out via email.";
pub const SENT_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";

#[derive(Debug, PartialEq)]
pub enum Submission {
    Sent(ContactMessage),
    NotConfigured,
    Invalid(ValidationError),
}

impl Submission {
    /// Feedback line shown above the contact form.
    pub fn feedback(&self) -> String {
        match self {
            Submission::Sent(_) => SENT_MESSAGE.to_string(),
            Submission::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            Submission::Invalid(err) => err.to_string(),
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Submission::Sent(_))
    }
}

/// Stores a contact message in the inbox. Only storage failures are errors.
pub fn submit(enabled: bool, inbox: &mut Collection<ContactMessage>, form: &ContactForm) -> Result<Submission> {
    if !enabled {
        return Ok(Submission::NotConfigured);
    }

    let message = match form.to_message() {
        Ok(message) => message,
        Err(err) => return Ok(Submission::Invalid(err)),
    };

    let message = inbox.insert(message)?;
    info!("Contact message {} received from {}", message.id, message.email);
    Ok(Submission::Sent(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            message: "Hi there".to_string(),
        }
    }

    #[test]
    fn test_submit() {
        let dir = tempfile::tempdir().unwrap();
        let mut inbox = Collection::open(dir.path().join("messages.json")).unwrap();

        let outcome = submit(true, &mut inbox, &form()).unwrap();
        assert!(outcome.is_sent());
        assert_eq!(outcome.feedback(), SENT_MESSAGE);
        assert_eq!(inbox.all().len(), 1);

        let reopened: Collection<ContactMessage> = Collection::open(dir.path().join("messages.json")).unwrap();
        assert_eq!(reopened.all()[0].message, "Hi there");
    }

    #[test]
    fn test_not_configured_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut inbox = Collection::open(dir.path().join("messages.json")).unwrap();

        let outcome = submit(false, &mut inbox, &form()).unwrap();
        assert_eq!(outcome, Submission::NotConfigured);
        assert_eq!(outcome.feedback(), NOT_CONFIGURED_MESSAGE);
        assert!(inbox.all().is_empty());
    }

    #[test]
    fn test_invalid_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut inbox = Collection::open(dir.path().join("messages.json")).unwrap();

        let bad = ContactForm { message: " ".to_string(), ..form() };
        let outcome = submit(true, &mut inbox, &bad).unwrap();
        assert_eq!(outcome.feedback(), "Message is required");
        assert!(inbox.all().is_empty());
    }
}
