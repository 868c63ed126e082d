use std::fmt;
use std::fmt::Formatter;
use std::str::Split;

mod matchers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPlatform {
    Youtube,
    Vimeo,
}

impl VideoPlatform {
    pub fn from_name(name: &str) -> Option<VideoPlatform> {
        match name {
            "youtube" => Some(VideoPlatform::Youtube),
            "vimeo" => Some(VideoPlatform::Vimeo),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VideoPlatform::Youtube => "youtube",
            VideoPlatform::Vimeo => "vimeo",
        }
    }

    pub fn embed_url(&self, id: &str) -> String {
        match self {
            VideoPlatform::Youtube => format!("https://www.youtube.com/embed/{}", id),
            VideoPlatform::Vimeo => format!("https://player.vimeo.com/video/{}", id),
        }
    }

    pub fn player_title(&self) -> &'static str {
        match self {
            VideoPlatform::Youtube => "YouTube video player",
            VideoPlatform::Vimeo => "Vimeo video player",
        }
    }
}

impl fmt::Display for VideoPlatform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One rendered unit of a post body. Every source line produces exactly one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Heading2(String),
    Heading3(String),
    ListItem(String),
    Paragraph(String),
    BlankLine,
    VideoEmbed { platform: VideoPlatform, id: String },
    ImageEmbed(String),
}

impl ContentBlock {
    /// Text carried by the block, if it has any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Heading2(text)
            | ContentBlock::Heading3(text)
            | ContentBlock::ListItem(text)
            | ContentBlock::Paragraph(text) => Some(text.as_str()),
            ContentBlock::BlankLine
            | ContentBlock::VideoEmbed { .. }
            | ContentBlock::ImageEmbed(_) => None,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, ContentBlock::ListItem(_))
    }
}

/// Lazy sequence of blocks over a post body.
///
/// Clones walk the remaining lines independently. Call [`render`] again to start over.
#[derive(Clone)]
pub struct Blocks<'a> {
    lines: Split<'a, char>,
}

impl Iterator for Blocks<'_> {
    type Item = ContentBlock;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(render_line)
    }
}

/// Renders a micro-markup body, one block per `\n`-separated line.
///
/// ```
/// use folio::markup::{render, ContentBlock};
///
/// let blocks: Vec<_> = render("## Title\nplain text").collect();
/// assert_eq!(blocks, vec![
///     ContentBlock::Heading2("Title".to_string()),
///     ContentBlock::Paragraph("plain text".to_string()),
/// ]);
/// ```
pub fn render(content: &str) -> Blocks<'_> {
    Blocks {
        lines: content.split('\n'),
    }
}

pub fn render_line(line: &str) -> ContentBlock {
    matchers::RULES
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or_else(|| ContentBlock::Paragraph(line.to_string()))
}
