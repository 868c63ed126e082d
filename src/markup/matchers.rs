use lazy_static::lazy_static;
use regex::Regex;

use crate::markup::{ContentBlock, VideoPlatform};

pub(super) type Rule = fn(&str) -> Option<ContentBlock>;

/// Evaluated top to bottom, first match wins. Lines matching nothing are paragraphs.
pub(super) const RULES: &[Rule] = &[
    video_embed,
    image_embed,
    heading2,
    heading3,
    list_item,
    blank_line,
];

fn video_embed(line: &str) -> Option<ContentBlock> {
    lazy_static! {
        static ref VIDEO_REGEX: Regex = Regex::new(r"\[video:(?P<platform>youtube|vimeo):(?P<id>[^\]]+)\]").unwrap();
    }

    if !line.starts_with("[video:") {
        return None;
    }

    let cap = VIDEO_REGEX.captures(line)?;
    let platform = VideoPlatform::from_name(cap.name("platform")?.as_str())?;
    let id = cap.name("id")?.as_str().to_string();
    Some(ContentBlock::VideoEmbed { platform, id })
}

fn image_embed(line: &str) -> Option<ContentBlock> {
    lazy_static! {
        static ref IMAGE_REGEX: Regex = Regex::new(r"\[image:(?P<url>[^\]]+)\]").unwrap();
    }

    if !line.starts_with("[image:") {
        return None;
    }

    IMAGE_REGEX.captures(line)
        .and_then(|cap| cap.name("url"))
        .map(|url| ContentBlock::ImageEmbed(url.as_str().to_string()))
}

fn heading2(line: &str) -> Option<ContentBlock> {
    line.strip_prefix("## ").map(|text| ContentBlock::Heading2(text.to_string()))
}

fn heading3(line: &str) -> Option<ContentBlock> {
    line.strip_prefix("### ").map(|text| ContentBlock::Heading3(text.to_string()))
}

fn list_item(line: &str) -> Option<ContentBlock> {
    line.strip_prefix("- ").map(|text| ContentBlock::ListItem(text.to_string()))
}

fn blank_line(line: &str) -> Option<ContentBlock> {
    // A byte order mark counts as whitespace here
    if line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}').is_empty() {
        Some(ContentBlock::BlankLine)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_wins_over_other_prefixes() {
        // Precedence only matters for lines several rules could claim.
        let res = video_embed("[video:youtube:## not a heading]");
        assert_eq!(res, Some(ContentBlock::VideoEmbed {
            platform: VideoPlatform::Youtube,
            id: "## not a heading".to_string(),
        }));
    }

    #[test]
    fn test_video_requires_line_prefix() {
        assert_eq!(video_embed("see [video:youtube:abc]"), None);
        assert_eq!(image_embed("see [image:a.png]"), None);
    }

    #[test]
    fn test_heading_rules_do_not_overlap() {
        assert_eq!(heading2("### Sub"), None);
        assert_eq!(heading3("## Title"), None);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(blank_line(""), Some(ContentBlock::BlankLine));
        assert_eq!(blank_line(" \r"), Some(ContentBlock::BlankLine));
        assert_eq!(blank_line(" x "), None);
    }
}
