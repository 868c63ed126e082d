use ramhorns::Template;

use crate::assets::build_asset_url;
use crate::error::Result;
use crate::markup::{Blocks, ContentBlock, VideoPlatform};
use crate::model::Post;
use crate::session::Session;
use crate::text_utils::format_long_date;
use crate::view::{parse_template, ViewTag};

pub const THANK_YOU_MESSAGE: &str = "Thank you for your support!";

#[derive(ramhorns::Content)]
struct ViewListItem {
    text: String,
}

/// A block as the template sees it. Consecutive list items share one `list` block.
#[derive(ramhorns::Content, Default)]
struct ViewBlock {
    heading2: bool,
    heading3: bool,
    paragraph: bool,
    line_break: bool,
    video: bool,
    image: bool,
    list: bool,
    text: String,
    url: String,
    player_title: &'static str,
    player_allow: &'static str,
    items: Vec<ViewListItem>,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    id: u64,
    post_title: &'a str,
    excerpt: &'a str,
    author: &'a str,
    tags: Vec<ViewTag<'a>>,
    date: String,
    read_time: &'a str,
    has_thumbnail: bool,
    thumbnail_url: String,
    blocks: Vec<ViewBlock>,
    likes: u64,
    liked: bool,
    like_label: String,
    like_action: String,
    thank_you: &'static str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> Result<PostRenderer> {
        Ok(PostRenderer {
            template: parse_template("post view", view_tpl_src)?,
        })
    }

    pub fn render(&self, post: &Post, blocks: Blocks, session: &Session, assets_base_url: &str) -> String {
        let liked = session.liked.contains(post.id);
        let like_label = if liked {
            format!("Liked ({})", post.likes)
        } else {
            format!("Like ({})", post.likes)
        };
        let thumbnail_url = build_asset_url(assets_base_url, post.thumbnail_path.as_deref());

        self.template.render(&ViewItem {
            id: post.id,
            post_title: post.title.as_str(),
            excerpt: post.excerpt.as_str(),
            author: post.author.as_str(),
            tags: ViewTag::list(&post.tags),
            date: format_long_date(&post.date),
            read_time: post.read_time.as_str(),
            has_thumbnail: thumbnail_url.is_some(),
            thumbnail_url: thumbnail_url.unwrap_or_default(),
            blocks: view_blocks(blocks),
            likes: post.likes,
            liked,
            like_label,
            like_action: format!("/blog/{}/like", post.id),
            thank_you: THANK_YOU_MESSAGE,
        })
    }
}

fn player_allow(platform: VideoPlatform) -> &'static str {
    match platform {
        VideoPlatform::Youtube => "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
        VideoPlatform::Vimeo => "autoplay; fullscreen; picture-in-picture",
    }
}

fn view_blocks(blocks: Blocks) -> Vec<ViewBlock> {
    let mut view: Vec<ViewBlock> = vec![];
    for block in blocks {
        if let ContentBlock::ListItem(text) = block {
            match view.last_mut().filter(|last| last.list) {
                Some(list) => list.items.push(ViewListItem { text }),
                None => view.push(ViewBlock {
                    list: true,
                    items: vec![ViewListItem { text }],
                    ..Default::default()
                }),
            }
            continue;
        }

        let view_block = match block {
            ContentBlock::Heading2(text) => ViewBlock { heading2: true, text, ..Default::default() },
            ContentBlock::Heading3(text) => ViewBlock { heading3: true, text, ..Default::default() },
            ContentBlock::Paragraph(text) => ViewBlock { paragraph: true, text, ..Default::default() },
            ContentBlock::BlankLine => ViewBlock { line_break: true, ..Default::default() },
            ContentBlock::VideoEmbed { platform, id } => ViewBlock {
                video: true,
                url: platform.embed_url(&id),
                player_title: platform.player_title(),
                player_allow: player_allow(platform),
                ..Default::default()
            },
            ContentBlock::ImageEmbed(url) => ViewBlock { image: true, url, ..Default::default() },
            ContentBlock::ListItem(_) => continue,
        };
        view.push(view_block);
    }
    view
}
