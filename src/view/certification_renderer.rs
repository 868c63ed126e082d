use ramhorns::Template;

use crate::assets::{asset_url_or, PLACEHOLDER_CERTIFICATE};
use crate::error::Result;
use crate::model::Certification;
use crate::text_utils::format_long_date;
use crate::view::parse_template;

#[derive(ramhorns::Content)]
struct CertificationItem<'a> {
    title: &'a str,
    issuer: &'a str,
    date: String,
    image_url: String,
    credential_id: &'a str,
    verification_link: &'a str,
}

#[derive(ramhorns::Content)]
struct CertificationsPage<'a> {
    certifications: Vec<CertificationItem<'a>>,
}

pub struct CertificationRenderer<'a> {
    pub template: Template<'a>,
}

impl CertificationRenderer<'_> {
    pub fn new(certifications_tpl_src: &str) -> Result<CertificationRenderer> {
        Ok(CertificationRenderer {
            template: parse_template("certifications", certifications_tpl_src)?,
        })
    }

    /// Renders in the given order. Callers sort with [`crate::post_filter::sort_certifications`].
    pub fn render(&self, certifications: &[Certification], assets_base_url: &str) -> String {
        let certifications = certifications.iter()
            .map(|cert| CertificationItem {
                title: cert.title.as_str(),
                issuer: cert.issuer.as_str(),
                date: format_long_date(&cert.date),
                image_url: asset_url_or(assets_base_url, cert.image_path.as_deref(), PLACEHOLDER_CERTIFICATE),
                credential_id: cert.credential_id.as_deref().unwrap_or(""),
                verification_link: cert.verification_link.as_deref().unwrap_or(""),
            })
            .collect();

        self.template.render(&CertificationsPage { certifications })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::post_filter::sort_certifications;

    use super::*;

    fn cert(id: u64, title: &str, date: (i32, u32, u32)) -> Certification {
        Certification {
            id,
            title: title.to_string(),
            issuer: "Org".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            image_path: None,
            verification_link: None,
            credential_id: None,
        }
    }

    #[test]
    fn render_certifications() {
        let renderer = CertificationRenderer::new(
            "{{#certifications}}{{title}} {{date}} {{image_url}}{{#credential_id}} ID: x{{/credential_id}};{{/certifications}}"
        ).unwrap();
        let mut certs = vec![cert(1, "Old", (2021, 6, 1)), cert(2, "New", (2023, 1, 10))];
        certs[1].credential_id = Some("ABC".to_string());
        sort_certifications(&mut certs);

        assert_eq!(renderer.render(&certs, "/uploads"),
                   "New January 10, 2023 https://placehold.co/600x400 ID: x;Old June 1, 2021 https://placehold.co/600x400;");
    }
}
