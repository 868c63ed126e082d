use std::collections::BTreeSet;

use crate::model::{Certification, Post};

/// Search box and tag selection of the blog list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub selected_tag: Option<String>,
}

impl FilterState {
    pub fn new(query: &str, selected_tag: Option<&str>) -> Self {
        FilterState {
            query: query.to_string(),
            selected_tag: selected_tag.map(|t| t.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.selected_tag.is_none()
    }

    fn matches(&self, post: &Post, query: &str) -> bool {
        matches_search(post, query) && self.matches_tag(post)
    }

    fn matches_tag(&self, post: &Post) -> bool {
        match self.selected_tag {
            None => true,
            Some(ref tag) => post.tags.contains(tag),
        }
    }
}

/// `query` must already be lowercase.
fn matches_search(post: &Post, query: &str) -> bool {
    query.is_empty()
        || post.title.to_lowercase().contains(query)
        || post.excerpt.to_lowercase().contains(query)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

/// Posts matching both the search query and the selected tag, in input order.
pub fn filter_posts<'a>(posts: &'a [Post], state: &FilterState) -> Vec<&'a Post> {
    let query = state.query.to_lowercase();
    posts.iter()
        .filter(|post| state.matches(post, &query))
        .collect()
}

/// Every distinct tag across all posts, sorted ascending.
pub fn tag_universe(posts: &[Post]) -> Vec<String> {
    let tags: BTreeSet<&str> = posts.iter()
        .flat_map(|post| post.tags.iter().map(|t| t.as_str()))
        .collect();
    tags.into_iter().map(|t| t.to_string()).collect()
}

/// Newest first. Certifications sharing a date keep their stored order.
pub fn sort_certifications(certifications: &mut [Certification]) {
    certifications.sort_by(|a, b| b.date.cmp(&a.date));
}
