use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Record;

/// A message left through the contact page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl Record for ContactMessage {
    const KIND: &'static str = "message";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}
