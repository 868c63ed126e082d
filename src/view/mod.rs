//! Page renderers on top of ramhorns templates.
//!
//! Renderers fill one page body each; [`layout_renderer`] wraps that body in
//! the site chrome. Templates are read from the configured template dir on
//! every request, so edits show up without a restart.

use std::fs;
use std::path::Path;

use ramhorns::Template;

use crate::error::{FolioError, Result};

pub mod admin_renderer;
pub mod certification_renderer;
pub mod contact_renderer;
pub mod cv_renderer;
pub mod home_renderer;
pub mod layout_renderer;
pub mod list_renderer;
pub mod message_renderer;
pub mod post_renderer;
pub mod project_renderer;

pub fn read_template(template_dir: &Path, file_name: &str) -> Result<String> {
    let path = template_dir.join(file_name);
    fs::read_to_string(&path)
        .map_err(|e| FolioError::Template(format!("Error reading {}: {}", path.display(), e)))
}

pub(crate) fn parse_template<'a>(name: &str, src: &'a str) -> Result<Template<'a>> {
    Template::new(src)
        .map_err(|e| FolioError::Template(format!("Error parsing {} template: {}", name, e)))
}

#[derive(ramhorns::Content)]
pub(crate) struct ViewTag<'a> {
    tag: &'a str,
}

impl<'a> ViewTag<'a> {
    pub(crate) fn list(tags: &'a [String]) -> Vec<ViewTag<'a>> {
        tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect()
    }
}

#[derive(ramhorns::Content)]
pub(crate) struct ViewLink<'a> {
    label: &'a str,
    url: &'a str,
}

impl<'a> ViewLink<'a> {
    pub(crate) fn list(links: Vec<(&'a str, &'a str)>) -> Vec<ViewLink<'a>> {
        links.into_iter().map(|(label, url)| ViewLink { label, url }).collect()
    }
}

/// Badges for the first `shown` items plus the "+N" text for the rest.
pub(crate) fn badges(items: &[String], shown: usize) -> (Vec<ViewTag<'_>>, String) {
    let visible = ViewTag::list(&items[..items.len().min(shown)]);
    let more = if items.len() > shown {
        format!("+{}", items.len() - shown)
    } else {
        String::new()
    };
    (visible, more)
}
