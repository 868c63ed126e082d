use std::path::Path;

use spdlog::info;

use crate::error::Result;
use crate::model::{Certification, ContactMessage, Post, Profile, Project};

pub mod collection;

pub use collection::Collection;

pub const BLOGS_FILE: &str = "blogs.json";
pub const CERTIFICATIONS_FILE: &str = "certifications.json";
pub const PROFILES_FILE: &str = "profiles.json";
pub const PROJECTS_FILE: &str = "projects.json";
pub const MESSAGES_FILE: &str = "messages.json";

/// All data files of a site.
pub struct Store {
    pub blogs: Collection<Post>,
    pub certifications: Collection<Certification>,
    pub profiles: Collection<Profile>,
    pub projects: Collection<Project>,
    pub messages: Collection<ContactMessage>,
}

impl Store {
    pub fn open(data_dir: &Path) -> Result<Store> {
        info!("Opening data files in {}", data_dir.display());
        Ok(Store {
            blogs: Collection::open(data_dir.join(BLOGS_FILE))?,
            certifications: Collection::open(data_dir.join(CERTIFICATIONS_FILE))?,
            profiles: Collection::open(data_dir.join(PROFILES_FILE))?,
            projects: Collection::open(data_dir.join(PROJECTS_FILE))?,
            messages: Collection::open(data_dir.join(MESSAGES_FILE))?,
        })
    }

    pub fn primary_profile(&self) -> Option<&Profile> {
        self.profiles.first()
    }

    /// Adds one like. Nothing stops the same visitor from liking twice from another browser.
    pub fn like_post(&mut self, id: u64) -> Result<Post> {
        self.blogs.modify(id, |post| post.likes += 1)
    }

    /// Saves the primary profile, creating it when there is none yet.
    pub fn save_primary_profile(&mut self, profile: Profile) -> Result<Profile> {
        match self.profiles.first().map(|p| p.id) {
            Some(id) => {
                // Fields the profile form does not edit survive the update
                let cv_path = self.profiles.get(id)?.cv_path.clone();
                let profile = Profile { cv_path, ..profile };
                self.profiles.update(id, profile)
            }
            None => self.profiles.insert(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::post::test_posts::post;

    use super::*;

    fn profile(name: &str) -> Profile {
        Profile {
            name: name.to_string(),
            title: "Engineer".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_like_post() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        store.blogs.insert(post(0, "Liked", &[])).unwrap();
        store.like_post(1).unwrap();
        let liked = store.like_post(1).unwrap();
        assert_eq!(liked.likes, 2);
        assert!(store.like_post(2).is_err());
    }

    #[test]
    fn test_save_primary_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        assert!(store.primary_profile().is_none());

        let created = store.save_primary_profile(profile("Jane")).unwrap();
        assert_eq!(created.id, 1);
        store.profiles.modify(1, |p| p.cv_path = Some("cv/abc.pdf".to_string())).unwrap();

        let updated = store.save_primary_profile(profile("Jane Doe")).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.cv_path.as_deref(), Some("cv/abc.pdf"));
        assert_eq!(store.profiles.all().len(), 1);
        assert_eq!(store.primary_profile().unwrap().name, "Jane Doe");
    }
}
