use chrono::Datelike;
use ramhorns::Template;

use crate::error::Result;
use crate::session::Session;
use crate::text_utils::today;
use crate::view::parse_template;

pub const NAV_LINKS: [(&str, &str); 6] = [
    ("Home", "/"),
    ("Projects", "/projects"),
    ("Blog", "/blog"),
    ("Certifications", "/certifications"),
    ("CV", "/cv"),
    ("Contact", "/contact"),
];

#[derive(ramhorns::Content)]
struct NavItem {
    label: &'static str,
    link: &'static str,
    active: bool,
}

#[derive(ramhorns::Content)]
struct LayoutPage<'a> {
    page_title: &'a str,
    owner: &'a str,
    admin: bool,
    year: i32,
    nav: Vec<NavItem>,
    body: &'a str,
}

/// Which page is being wrapped. `section` is the path whose nav link is highlighted.
pub struct PageInfo<'a> {
    pub title: &'a str,
    pub owner: &'a str,
    pub section: &'a str,
}

pub struct LayoutRenderer<'a> {
    pub template: Template<'a>,
}

impl LayoutRenderer<'_> {
    pub fn new(layout_tpl_src: &str) -> Result<LayoutRenderer> {
        Ok(LayoutRenderer {
            template: parse_template("layout", layout_tpl_src)?,
        })
    }

    pub fn render(&self, page: &PageInfo, session: &Session, body: &str) -> String {
        let nav = NAV_LINKS.iter()
            .map(|&(label, link)| NavItem {
                label,
                link,
                active: is_active(link, page.section),
            })
            .collect();

        self.template.render(&LayoutPage {
            page_title: page.title,
            owner: page.owner,
            admin: session.admin,
            year: today().year(),
            nav,
            body,
        })
    }
}

fn is_active(link: &str, section: &str) -> bool {
    match link {
        "/" => section == "/",
        _ => section == link || section.starts_with(&format!("{}/", link)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let renderer = LayoutRenderer::new(
            "<title>{{page_title}} | {{owner}}</title>{{#nav}}{{#active}}*{{/active}}{{label}};{{/nav}}{{#admin}}[admin]{{/admin}}{{{body}}}"
        ).unwrap();
        let page = PageInfo { title: "Blog", owner: "Jane & Co", section: "/blog/3" };

        let res = renderer.render(&page, &Session::default(), "<p>hi</p>");
        assert_eq!(res, "<title>Blog | Jane &amp; Co</title>Home;Projects;*Blog;Certifications;CV;Contact;<p>hi</p>");

        let admin = Session { admin: true, ..Default::default() };
        assert!(renderer.render(&page, &admin, "").ends_with("[admin]"));
    }

    #[test]
    fn test_is_active() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/blog"));
        assert!(is_active("/blog", "/blog"));
        assert!(!is_active("/cv", "/cvs"));
    }
}
