use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{require, ValidationError};
use crate::model::{blank_as_none, null_as_empty, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub read_time: String,
    pub author: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
}

impl Record for Post {
    const KIND: &'static str = "blog post";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("Title", &self.title)?;
        require("Excerpt", &self.excerpt)?;
        require("Content", &self.content)?;
        require("Read time", &self.read_time)?;
        require("Author", &self.author)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_posts {
    use super::*;

    pub fn post(id: u64, title: &str, tags: &[&str]) -> Post {
        Post {
            id,
            title: title.to_string(),
            excerpt: format!("About {}", title),
            content: "## Intro\nBody".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            read_time: "5 min".to_string(),
            author: "Jane".to_string(),
            likes: 0,
            thumbnail_path: None,
        }
    }
}
