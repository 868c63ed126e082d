use ramhorns::Template;

use crate::assets::build_asset_url;
use crate::error::Result;
use crate::model::Profile;
use crate::view::parse_template;

#[derive(ramhorns::Content)]
struct CvPage {
    available: bool,
    cv_url: String,
}

pub struct CvRenderer<'a> {
    pub template: Template<'a>,
}

impl CvRenderer<'_> {
    pub fn new(cv_tpl_src: &str) -> Result<CvRenderer> {
        Ok(CvRenderer {
            template: parse_template("cv", cv_tpl_src)?,
        })
    }

    pub fn render(&self, profile: Option<&Profile>, assets_base_url: &str) -> String {
        let cv_url = profile.and_then(|p| build_asset_url(assets_base_url, p.cv_path.as_deref()));
        self.template.render(&CvPage {
            available: cv_url.is_some(),
            cv_url: cv_url.unwrap_or_default(),
        })
    }
}
