use serde::{Deserialize, Serialize};

use crate::error::{require, ValidationError};
use crate::model::{blank_as_none, null_as_blank, null_as_empty, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(deserialize_with = "null_as_blank")]
    pub github: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub linkedin: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub twitter: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub portfolio: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub facebook: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub instagram: String,
}

impl SocialLinks {
    /// Non-empty links as (label, url), in display order.
    pub fn present(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", self.github.as_str()),
            ("LinkedIn", self.linkedin.as_str()),
            ("Twitter / X", self.twitter.as_str()),
            ("Portfolio", self.portfolio.as_str()),
            ("Facebook", self.facebook.as_str()),
            ("Instagram", self.instagram.as_str()),
        ]
            .into_iter()
            .filter(|(_, url)| !url.trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default, deserialize_with = "null_as_blank")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub bio: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub location: String,
    #[serde(default, deserialize_with = "null_social_links")]
    pub social_links: SocialLinks,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stacks: Vec<Stack>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub what_i_work_on: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub cv_path: Option<String>,
}

fn null_social_links<'de, D>(deserializer: D) -> Result<SocialLinks, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<SocialLinks>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record for Profile {
    const KIND: &'static str = "profile";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("Name", &self.name)?;
        require("Title", &self.title)?;
        require("Email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ValidationError::invalid("Email", "must be a valid email address"));
        }
        if self.stacks.iter().any(|stack| stack.name.trim().is_empty()) {
            return Err(ValidationError::Required("Stack name"));
        }
        Ok(())
    }
}
