use serde::{Deserialize, Serialize};

use crate::model::{blank_as_none, null_as_blank, null_as_empty, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub preview_image_path: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub live_demo_link: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub x_link: Option<String>,
}

impl Record for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}
