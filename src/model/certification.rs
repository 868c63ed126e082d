use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{require, ValidationError};
use crate::model::{blank_as_none, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub issuer: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub verification_link: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
}

impl Record for Certification {
    const KIND: &'static str = "certification";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("Title", &self.title)?;
        require("Issuer", &self.issuer)?;
        Ok(())
    }
}
