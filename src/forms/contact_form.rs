use chrono::Utc;
use serde::Deserialize;

use crate::error::{require, ValidationError};
use crate::model::ContactMessage;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ramhorns::Content)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn to_message(&self) -> Result<ContactMessage, ValidationError> {
        require("Name", &self.name)?;
        require("Email", &self.email)?;
        require("Message", &self.message)?;
        if !self.email.contains('@') {
            return Err(ValidationError::invalid("Email", "must be a valid email address"));
        }

        Ok(ContactMessage {
            id: 0,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
            received_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_message() {
        let form = ContactForm {
            name: "Sam".to_string(),
            email: "sam@example.com ".to_string(),
            message: " Hello! ".to_string(),
        };
        let message = form.to_message().unwrap();
        assert_eq!(message.email, "sam@example.com");
        assert_eq!(message.message, "Hello!");

        let form = ContactForm { email: "sam".to_string(), ..form };
        assert_eq!(form.to_message().err().unwrap().to_string(), "Email must be a valid email address");
        assert_eq!(ContactForm::default().to_message(), Err(ValidationError::Required("Name")));
    }
}
