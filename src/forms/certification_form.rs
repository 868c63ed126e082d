use serde::Deserialize;

use crate::error::{require, ValidationError};
use crate::forms::optional;
use crate::model::{Certification, Record};
use crate::text_utils::{format_input_date, parse_input_date, today};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ramhorns::Content)]
#[serde(default)]
pub struct CertificationForm {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub verification_link: String,
    pub credential_id: String,
}

impl CertificationForm {
    pub fn new_certification() -> Self {
        CertificationForm {
            date: format_input_date(&today()),
            ..Default::default()
        }
    }

    pub fn from_certification(cert: &Certification) -> Self {
        CertificationForm {
            title: cert.title.clone(),
            issuer: cert.issuer.clone(),
            date: format_input_date(&cert.date),
            verification_link: cert.verification_link.clone().unwrap_or_default(),
            credential_id: cert.credential_id.clone().unwrap_or_default(),
        }
    }

    pub fn to_certification(&self, existing: Option<&Certification>) -> Result<Certification, ValidationError> {
        require("Date", &self.date)?;
        let date = parse_input_date(&self.date)
            .map_err(|_| ValidationError::invalid("Date", "must be formatted as YYYY-MM-DD"))?;

        let verification_link = optional(&self.verification_link);
        if let Some(ref link) = verification_link {
            if !link.starts_with("http://") && !link.starts_with("https://") {
                return Err(ValidationError::invalid("Verification link", "must start with http:// or https://"));
            }
        }

        let cert = Certification {
            id: existing.map(|c| c.id).unwrap_or(0),
            title: self.title.trim().to_string(),
            issuer: self.issuer.trim().to_string(),
            date,
            image_path: existing.and_then(|c| c.image_path.clone()),
            verification_link,
            credential_id: optional(&self.credential_id),
        };
        cert.validate()?;
        Ok(cert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields() {
        let form = CertificationForm {
            title: "AWS Solutions Architect".to_string(),
            issuer: "Amazon".to_string(),
            date: "2023-01-10".to_string(),
            verification_link: " ".to_string(),
            credential_id: "ABC-1".to_string(),
        };
        let cert = form.to_certification(None).unwrap();
        assert_eq!(cert.verification_link, None);
        assert_eq!(cert.credential_id.as_deref(), Some("ABC-1"));
        assert_eq!(CertificationForm::from_certification(&cert).verification_link, "");
    }

    #[test]
    fn test_rejects_bad_input() {
        let form = CertificationForm {
            title: "Cert".to_string(),
            issuer: "".to_string(),
            date: "2023-01-10".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_certification(None), Err(ValidationError::Required("Issuer")));

        let form = CertificationForm {
            issuer: "Org".to_string(),
            verification_link: "javascript:alert(1)".to_string(),
            ..form
        };
        assert!(form.to_certification(None).is_err());
    }
}
