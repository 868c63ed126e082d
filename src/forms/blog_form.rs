use serde::Deserialize;

use crate::error::{require, ValidationError};
use crate::model::{Post, Record};
use crate::text_utils::{format_input_date, join_list, parse_input_date, split_list, today};

pub const DEFAULT_READ_TIME: &str = "5 min";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ramhorns::Content)]
#[serde(default)]
pub struct BlogForm {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub date: String,
    pub tags: String,
    pub read_time: String,
    pub author: String,
    pub likes: String,
}

impl BlogForm {
    /// Initial values of the "New Blog Post" form.
    pub fn new_post(author: &str) -> Self {
        BlogForm {
            date: format_input_date(&today()),
            read_time: DEFAULT_READ_TIME.to_string(),
            author: author.to_string(),
            likes: "0".to_string(),
            ..Default::default()
        }
    }

    pub fn from_post(post: &Post) -> Self {
        BlogForm {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            date: format_input_date(&post.date),
            tags: join_list(&post.tags),
            read_time: post.read_time.clone(),
            author: post.author.clone(),
            likes: post.likes.to_string(),
        }
    }

    /// Builds the post to store. `existing` supplies what the form does not edit.
    pub fn to_post(&self, existing: Option<&Post>) -> Result<Post, ValidationError> {
        require("Date", &self.date)?;
        let date = parse_input_date(&self.date)
            .map_err(|_| ValidationError::invalid("Date", "must be formatted as YYYY-MM-DD"))?;

        let tags = split_list(&self.tags);
        if tags.is_empty() {
            return Err(ValidationError::Required("Tags"));
        }

        let likes = match self.likes.trim() {
            "" => 0,
            likes => likes.parse::<u64>()
                .map_err(|_| ValidationError::invalid("Likes", "must be a non-negative number"))?,
        };

        let post = Post {
            id: existing.map(|p| p.id).unwrap_or(0),
            title: self.title.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            content: self.content.clone(),
            tags,
            date,
            read_time: self.read_time.trim().to_string(),
            author: self.author.trim().to_string(),
            likes,
            thumbnail_path: existing.and_then(|p| p.thumbnail_path.clone()),
        };
        post.validate()?;
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn filled() -> BlogForm {
        BlogForm {
            title: " Go Basics ".to_string(),
            excerpt: "Getting started".to_string(),
            content: "## Hello\n- one".to_string(),
            date: "2024-05-02".to_string(),
            tags: "go, backend, ".to_string(),
            read_time: "4 min".to_string(),
            author: "Jane".to_string(),
            likes: "3".to_string(),
        }
    }

    #[test]
    fn test_to_post() {
        let post = filled().to_post(None).unwrap();
        assert_eq!(post.title, "Go Basics");
        assert_eq!(post.tags, ["go", "backend"]);
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(post.likes, 3);
        assert_eq!(post.content, "## Hello\n- one");
        assert_eq!(post.thumbnail_path, None);
    }

    #[test]
    fn test_edit_keeps_thumbnail() {
        let mut existing = filled().to_post(None).unwrap();
        existing.id = 8;
        existing.thumbnail_path = Some("thumbnails/a.png".to_string());
        let form = BlogForm { title: "Renamed".to_string(), ..filled() };
        let post = form.to_post(Some(&existing)).unwrap();
        assert_eq!(post.id, 8);
        assert_eq!(post.thumbnail_path.as_deref(), Some("thumbnails/a.png"));
        assert_eq!(BlogForm::from_post(&post).tags, "go, backend");
    }

    #[test]
    fn test_validation_messages() {
        let form = BlogForm { likes: "-1".to_string(), ..filled() };
        assert_eq!(form.to_post(None).err().unwrap().to_string(), "Likes must be a non-negative number");

        let form = BlogForm { tags: " , ".to_string(), ..filled() };
        assert_eq!(form.to_post(None), Err(ValidationError::Required("Tags")));

        let form = BlogForm { date: "May 2nd".to_string(), ..filled() };
        assert!(form.to_post(None).is_err());

        let form = BlogForm { excerpt: "".to_string(), ..filled() };
        assert_eq!(form.to_post(None), Err(ValidationError::Required("Excerpt")));

        let form = BlogForm { likes: "".to_string(), ..filled() };
        assert_eq!(form.to_post(None).unwrap().likes, 0);
    }

    #[test]
    fn test_new_post_defaults() {
        let form = BlogForm::new_post("Jane");
        assert_eq!(form.read_time, DEFAULT_READ_TIME);
        assert_eq!(form.likes, "0");
        assert_eq!(form.date, format_input_date(&today()));
    }

    #[test]
    fn test_urlencoded_decoding() {
        let form: BlogForm = serde_urlencoded::from_str("title=Hi&content=%23%23+Hello%0A-+one&tags=a%2C+b").unwrap();
        assert_eq!(form.content, "## Hello\n- one");
        assert_eq!(form.tags, "a, b");
        assert_eq!(form.author, "");
    }
}
