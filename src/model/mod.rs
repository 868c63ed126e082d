use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

pub mod certification;
pub mod message;
pub mod post;
pub mod profile;
pub mod project;

pub use certification::Certification;
pub use message::ContactMessage;
pub use post::Post;
pub use profile::{Profile, SocialLinks, Stack};
pub use project::Project;

/// A row of one of the JSON data files.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Singular name used in logs and not-found messages.
    const KIND: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Absent and `null` lists both read as empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Absent, `null` and whitespace-only strings all read as `None`.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// `null` reads as an empty string.
pub(crate) fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
