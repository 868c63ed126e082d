use ramhorns::Template;

use crate::error::Result;
use crate::forms::ContactForm;
use crate::model::Profile;
use crate::view::{parse_template, ViewLink};

#[derive(ramhorns::Content)]
struct ContactPage<'a> {
    email: &'a str,
    social_links: Vec<ViewLink<'a>>,
    feedback: &'a str,
    success: bool,
    form: &'a ContactForm,
}

/// Result of the previous submission, shown above the form.
pub struct Feedback<'a> {
    pub message: &'a str,
    pub success: bool,
}

pub struct ContactRenderer<'a> {
    pub template: Template<'a>,
}

impl ContactRenderer<'_> {
    pub fn new(contact_tpl_src: &str) -> Result<ContactRenderer> {
        Ok(ContactRenderer {
            template: parse_template("contact", contact_tpl_src)?,
        })
    }

    pub fn render(&self, profile: Option<&Profile>, form: &ContactForm, feedback: Option<Feedback>) -> String {
        let (message, success) = feedback.map(|f| (f.message, f.success)).unwrap_or(("", false));
        self.template.render(&ContactPage {
            email: profile.map(|p| p.email.as_str()).unwrap_or(""),
            social_links: profile.map(|p| ViewLink::list(p.social_links.present())).unwrap_or_default(),
            feedback: message,
            success,
            form,
        })
    }
}
