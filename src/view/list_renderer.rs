use ramhorns::Template;

use crate::assets::{asset_url_or, PLACEHOLDER_WIDE};
use crate::error::Result;
use crate::model::Post;
use crate::post_filter::FilterState;
use crate::text_utils::format_long_date;
use crate::view::{parse_template, ViewTag};

pub const NO_POSTS_MESSAGE: &str = "No posts found matching your criteria.";

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    query: &'a str,
    all_link: String,
    all_selected: bool,
    tags: Vec<TagFilter<'a>>,
    post_list: Vec<PostItem<'a>>,
    no_posts_message: &'static str,
}

#[derive(ramhorns::Content)]
struct TagFilter<'a> {
    tag: &'a str,
    link: String,
    selected: bool,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    link: String,
    title: &'a str,
    excerpt: &'a str,
    date: String,
    read_time: &'a str,
    thumbnail_url: String,
    tags: Vec<ViewTag<'a>>,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> Result<ListRenderer> {
        Ok(ListRenderer {
            template: parse_template("blog list", list_tpl_src)?,
        })
    }

    /// `posts` is the filtered list, `tags` the tag universe of all posts.
    pub fn render(&self, posts: &[&Post], tags: &[String], state: &FilterState, assets_base_url: &str) -> String {
        let post_list = posts.iter()
            .map(|post| PostItem {
                link: format!("/blog/{}", post.id),
                title: post.title.as_str(),
                excerpt: post.excerpt.as_str(),
                date: format_long_date(&post.date),
                read_time: post.read_time.as_str(),
                thumbnail_url: asset_url_or(assets_base_url, post.thumbnail_path.as_deref(), PLACEHOLDER_WIDE),
                tags: ViewTag::list(&post.tags),
            })
            .collect();

        let tags = tags.iter()
            .map(|tag| TagFilter {
                tag: tag.as_str(),
                link: filter_link(&state.query, Some(tag)),
                selected: state.selected_tag.as_deref() == Some(tag.as_str()),
            })
            .collect();

        self.template.render(&ListPage {
            query: state.query.as_str(),
            all_link: filter_link(&state.query, None),
            all_selected: state.selected_tag.is_none(),
            tags,
            post_list,
            no_posts_message: NO_POSTS_MESSAGE,
        })
    }
}

/// Blog list URL keeping the current search text.
pub fn filter_link(query: &str, tag: Option<&str>) -> String {
    let mut params = vec![];
    if !query.is_empty() {
        params.push(("q", query));
    }
    if let Some(tag) = tag {
        params.push(("tag", tag));
    }
    match serde_urlencoded::to_string(&params) {
        Ok(qs) if !qs.is_empty() => format!("/blog?{}", qs),
        _ => "/blog".to_string(),
    }
}
