use ramhorns::Template;

use crate::assets::build_asset_url;
use crate::error::Result;
use crate::forms::{BlogForm, CertificationForm, ProfileForm};
use crate::model::{Certification, ContactMessage, Post, Profile};
use crate::text_utils::format_long_date;
use crate::view::{badges, parse_template, ViewTag};

const SHOWN_TAGS: usize = 3;

#[derive(ramhorns::Content)]
struct LoginPage<'a> {
    error: &'a str,
}

#[derive(ramhorns::Content)]
struct MessageItem<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    received: String,
}

#[derive(ramhorns::Content)]
struct DashboardPage<'a> {
    post_count: usize,
    certification_count: usize,
    message_count: usize,
    messages: Vec<MessageItem<'a>>,
}

#[derive(ramhorns::Content)]
struct AdminPostItem<'a> {
    id: u64,
    title: &'a str,
    date: String,
    likes: u64,
    tags: Vec<ViewTag<'a>>,
    more_tags: String,
}

#[derive(ramhorns::Content)]
struct BlogListPage<'a> {
    posts: Vec<AdminPostItem<'a>>,
}

#[derive(ramhorns::Content)]
struct BlogFormPage<'a> {
    is_new: bool,
    action: String,
    error: &'a str,
    form: &'a BlogForm,
    thumbnail_url: String,
    upload_action: String,
}

#[derive(ramhorns::Content)]
struct AdminCertificationItem<'a> {
    id: u64,
    title: &'a str,
    issuer: &'a str,
    date: String,
}

#[derive(ramhorns::Content)]
struct CertificationListPage<'a> {
    certifications: Vec<AdminCertificationItem<'a>>,
}

#[derive(ramhorns::Content)]
struct CertificationFormPage<'a> {
    is_new: bool,
    action: String,
    error: &'a str,
    form: &'a CertificationForm,
    image_url: String,
    upload_action: String,
}

#[derive(ramhorns::Content)]
struct ProfilePage<'a> {
    error: &'a str,
    saved: bool,
    form: &'a ProfileForm,
}

#[derive(ramhorns::Content)]
struct CvPage {
    has_profile: bool,
    cv_url: String,
}

/// The record an admin form edits. `None` while creating one.
pub struct Editing<'a, T> {
    pub existing: Option<&'a T>,
    pub error: &'a str,
}

pub struct AdminRenderer<'a> {
    pub template: Template<'a>,
}

impl AdminRenderer<'_> {
    pub fn new(admin_tpl_src: &str) -> Result<AdminRenderer> {
        Ok(AdminRenderer {
            template: parse_template("admin", admin_tpl_src)?,
        })
    }

    pub fn render_login(&self, error: &str) -> String {
        self.template.render(&LoginPage { error })
    }

    pub fn render_dashboard(&self, posts: &[Post], certifications: &[Certification], messages: &[ContactMessage]) -> String {
        let messages: Vec<_> = messages.iter()
            .rev()
            .map(|m| MessageItem {
                name: m.name.as_str(),
                email: m.email.as_str(),
                message: m.message.as_str(),
                received: m.received_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            })
            .collect();

        self.template.render(&DashboardPage {
            post_count: posts.len(),
            certification_count: certifications.len(),
            message_count: messages.len(),
            messages,
        })
    }

    pub fn render_blog_list(&self, posts: &[Post]) -> String {
        let posts = posts.iter()
            .map(|post| {
                let (tags, more_tags) = badges(&post.tags, SHOWN_TAGS);
                AdminPostItem {
                    id: post.id,
                    title: post.title.as_str(),
                    date: format_long_date(&post.date),
                    likes: post.likes,
                    tags,
                    more_tags,
                }
            })
            .collect();

        self.template.render(&BlogListPage { posts })
    }

    pub fn render_blog_form(&self, form: &BlogForm, editing: Editing<Post>, assets_base_url: &str) -> String {
        let (action, upload_action) = match editing.existing {
            Some(post) => (format!("/admin/blogs/{}", post.id), format!("/admin/blogs/{}/thumbnail", post.id)),
            None => ("/admin/blogs".to_string(), String::new()),
        };
        let thumbnail_url = editing.existing
            .and_then(|post| build_asset_url(assets_base_url, post.thumbnail_path.as_deref()))
            .unwrap_or_default();

        self.template.render(&BlogFormPage {
            is_new: editing.existing.is_none(),
            action,
            error: editing.error,
            form,
            thumbnail_url,
            upload_action,
        })
    }

    pub fn render_certification_list(&self, certifications: &[Certification]) -> String {
        let certifications = certifications.iter()
            .map(|cert| AdminCertificationItem {
                id: cert.id,
                title: cert.title.as_str(),
                issuer: cert.issuer.as_str(),
                date: format_long_date(&cert.date),
            })
            .collect();

        self.template.render(&CertificationListPage { certifications })
    }

    pub fn render_certification_form(&self, form: &CertificationForm, editing: Editing<Certification>, assets_base_url: &str) -> String {
        let (action, upload_action) = match editing.existing {
            Some(cert) => (format!("/admin/certifications/{}", cert.id), format!("/admin/certifications/{}/image", cert.id)),
            None => ("/admin/certifications".to_string(), String::new()),
        };
        let image_url = editing.existing
            .and_then(|cert| build_asset_url(assets_base_url, cert.image_path.as_deref()))
            .unwrap_or_default();

        self.template.render(&CertificationFormPage {
            is_new: editing.existing.is_none(),
            action,
            error: editing.error,
            form,
            image_url,
            upload_action,
        })
    }

    pub fn render_profile(&self, form: &ProfileForm, error: &str, saved: bool) -> String {
        self.template.render(&ProfilePage { error, saved, form })
    }

    pub fn render_cv(&self, profile: Option<&Profile>, assets_base_url: &str) -> String {
        let cv_url = profile
            .and_then(|p| build_asset_url(assets_base_url, p.cv_path.as_deref()))
            .unwrap_or_default();
        self.template.render(&CvPage {
            has_profile: profile.is_some(),
            cv_url,
        })
    }
}
