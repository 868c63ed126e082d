use ntex::web;
use spdlog::{error, warn};

use crate::config::Config;
use crate::error::{FolioError, Result};
use crate::model::{Post, Record};
use crate::session::Session;
use crate::view::layout_renderer::{LayoutRenderer, PageInfo};
use crate::view::message_renderer::{Message, MessageRenderer};
use crate::view::read_template;

pub(crate) const LAYOUT_TPL: &str = "layout.tpl";
pub(crate) const MESSAGE_TPL: &str = "message.tpl";
pub(crate) const HOME_TPL: &str = "home.tpl";
pub(crate) const PROJECTS_TPL: &str = "projects.tpl";
pub(crate) const BLOG_LIST_TPL: &str = "blog_list.tpl";
pub(crate) const BLOG_POST_TPL: &str = "blog_post.tpl";
pub(crate) const CERTIFICATIONS_TPL: &str = "certifications.tpl";
pub(crate) const CV_TPL: &str = "cv.tpl";
pub(crate) const CONTACT_TPL: &str = "contact.tpl";
pub(crate) const ADMIN_LOGIN_TPL: &str = "admin_login.tpl";
pub(crate) const ADMIN_DASHBOARD_TPL: &str = "admin_dashboard.tpl";
pub(crate) const ADMIN_BLOGS_TPL: &str = "admin_blogs.tpl";
pub(crate) const ADMIN_BLOG_FORM_TPL: &str = "admin_blog_form.tpl";
pub(crate) const ADMIN_CERTIFICATIONS_TPL: &str = "admin_certifications.tpl";
pub(crate) const ADMIN_CERTIFICATION_FORM_TPL: &str = "admin_certification_form.tpl";
pub(crate) const ADMIN_PROFILE_TPL: &str = "admin_profile.tpl";
pub(crate) const ADMIN_CV_TPL: &str = "admin_cv.tpl";

pub(crate) const LOGIN_PATH: &str = "/admin/login";

/// Renders the body from `tpl_file` with `body`, then wraps it in the layout.
pub(crate) fn render_page<F>(config: &Config, session: &Session, title: &str, section: &str, tpl_file: &str, body: F) -> Result<String>
where
    F: FnOnce(&str) -> Result<String>,
{
    let template_dir = &config.paths.template_dir;
    let body_src = read_template(template_dir, tpl_file)?;
    let body = body(&body_src)?;

    let layout_src = read_template(template_dir, LAYOUT_TPL)?;
    let layout = LayoutRenderer::new(&layout_src)?;
    let page = PageInfo {
        title,
        owner: config.site.owner.as_str(),
        section,
    };
    Ok(layout.render(&page, session, &body))
}

pub(crate) fn html(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub(crate) fn see_other(location: &str) -> web::HttpResponse {
    web::HttpResponse::SeeOther()
        .header("Location", location)
        .finish()
}

/// Successful upload, answered with the new asset URL for the upload script.
pub(crate) fn uploaded(url: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(url)
}

pub(crate) fn respond(config: &Config, session: &Session, rendered: Result<String>) -> web::HttpResponse {
    match rendered {
        Ok(body) => html(body),
        Err(err) => error_response(config, session, err),
    }
}

pub(crate) fn error_response(config: &Config, session: &Session, err: FolioError) -> web::HttpResponse {
    match err {
        FolioError::NotFound { kind, id } => {
            warn!("Could not find {} {}", kind, id);
            let message = if kind == Post::KIND {
                Message::post_not_found()
            } else {
                Message::page_not_found()
            };
            not_found_page(config, session, &message)
        }
        FolioError::Validation(_) | FolioError::UnsupportedMedia(_) => {
            warn!("Rejected request: {}", err);
            web::HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(err.to_string())
        }
        FolioError::Unauthorized => see_other(LOGIN_PATH),
        err => {
            error!("Error handling request: {}", err);
            web::HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Internal error: {}", err))
        }
    }
}

pub(crate) fn not_found_page(config: &Config, session: &Session, message: &Message) -> web::HttpResponse {
    let rendered = render_page(config, session, message.heading, "", MESSAGE_TPL, |src| {
        Ok(MessageRenderer::new(src)?.render(message))
    });

    match rendered {
        Ok(body) => web::HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Error rendering not found page: {}", e);
            web::HttpResponse::NotFound().body(message.heading.to_string())
        }
    }
}

/// Value of the request's `Content-Type` header.
pub(crate) fn content_type(req: &web::HttpRequest) -> &str {
    req.headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
