use std::collections::HashMap;

use crate::post_filter::FilterState;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|v| v.as_str())
    }

    /// `q` is the search text, `tag` the selected tag. An empty `tag` means all posts.
    pub fn get_filter_state(&self) -> FilterState {
        let query = self.get("q").unwrap_or("");
        let tag = self.get("tag").filter(|t| !t.is_empty());
        FilterState::new(query, tag)
    }
}
