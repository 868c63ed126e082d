use ramhorns::Template;

use crate::error::Result;
use crate::view::parse_template;

/// A page made of a heading, a line of text and a way back.
#[derive(ramhorns::Content)]
pub struct Message<'a> {
    pub heading: &'a str,
    pub text: &'a str,
    pub link: &'a str,
    pub link_label: &'a str,
}

impl Message<'_> {
    pub fn page_not_found() -> Message<'static> {
        Message {
            heading: "404 - Page Not Found",
            text: "The page you're looking for doesn't exist or has been moved.",
            link: "/",
            link_label: "Go back to Homepage",
        }
    }

    pub fn post_not_found() -> Message<'static> {
        Message {
            heading: "Post not found",
            text: "",
            link: "/blog",
            link_label: "Back to Blog",
        }
    }
}

pub struct MessageRenderer<'a> {
    pub template: Template<'a>,
}

impl MessageRenderer<'_> {
    pub fn new(message_tpl_src: &str) -> Result<MessageRenderer> {
        Ok(MessageRenderer {
            template: parse_template("message", message_tpl_src)?,
        })
    }

    pub fn render(&self, message: &Message) -> String {
        self.template.render(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_message() {
        let renderer = MessageRenderer::new("<h1>{{heading}}</h1>{{#text}}<p>{{text}}</p>{{/text}}<a href=\"{{link}}\">{{link_label}}</a>").unwrap();
        assert_eq!(renderer.render(&Message::post_not_found()), "<h1>Post not found</h1><a href=\"/blog\">Back to Blog</a>");
        assert!(renderer.render(&Message::page_not_found()).contains("exist or has been moved."));
    }
}
