use ntex::util::Bytes;
use ntex::web;
use ntex::web::HttpRequest;
use spdlog::{info, warn};

use crate::assets::{build_asset_url, remove_upload, save_upload, AssetKind};
use crate::error::{FolioError, Result, ValidationError};
use crate::forms::{BlogForm, CertificationForm, LoginForm, ProfileForm};
use crate::model::{Certification, Post, Record};
use crate::server::pages::*;
use crate::server::{lock, parse_id, session_of, AppState, SharedState};
use crate::session::{admin_token, login_cookie, logout_cookie, Session};
use crate::view::admin_renderer::{AdminRenderer, Editing};

const INVALID_PASSWORD: &str = "Invalid password";

fn require_admin(session: &Session) -> Result<()> {
    if session.admin {
        Ok(())
    } else {
        Err(FolioError::Unauthorized)
    }
}

/// Renders an admin page. Visitors without an admin session are sent to the login page.
fn admin_page<F>(state: &AppState, session: &Session, title: &str, tpl_file: &str, body: F) -> web::HttpResponse
where
    F: FnOnce(&AdminRenderer) -> String,
{
    let rendered = require_admin(session).and_then(|_| {
        render_page(&state.config, session, title, "/admin", tpl_file, |src| {
            Ok(body(&AdminRenderer::new(src)?))
        })
    });
    respond(&state.config, session, rendered)
}

/// Same as [`admin_page`] for a form sent back with a validation message.
fn rejected_form<F>(state: &AppState, session: &Session, title: &str, tpl_file: &str, body: F) -> web::HttpResponse
where
    F: FnOnce(&AdminRenderer) -> String,
{
    let rendered = render_page(&state.config, session, title, "/admin", tpl_file, |src| {
        Ok(body(&AdminRenderer::new(src)?))
    });
    match rendered {
        Ok(page) => web::HttpResponse::BadRequest()
            .content_type("text/html; charset=utf-8")
            .body(page),
        Err(e) => error_response(&state.config, session, e),
    }
}

// Begin: Session region --------
#[web::get("/admin/login")]
pub(crate) async fn login_page(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    if session.admin {
        return see_other("/admin");
    }

    let rendered = render_page(&state.config, &session, "Admin Login", "/admin", ADMIN_LOGIN_TPL, |src| {
        Ok(AdminRenderer::new(src)?.render_login(""))
    });
    respond(&state.config, &session, rendered)
}

#[web::post("/admin/login")]
pub(crate) async fn login(req: HttpRequest, form: web::types::Form<LoginForm>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);

    let expected = state.config.admin.password.clone();
    if let Some(token) = state.sessions.login(&expected, &form.password) {
        info!("Admin logged in from {:?}", req.peer_addr());
        return web::HttpResponse::SeeOther()
            .header("Location", "/admin")
            .cookie(login_cookie(&token))
            .finish();
    }

    warn!("Failed admin login from {:?}", req.peer_addr());
    let rendered = render_page(&state.config, &session, "Admin Login", "/admin", ADMIN_LOGIN_TPL, |src| {
        Ok(AdminRenderer::new(src)?.render_login(INVALID_PASSWORD))
    });
    match rendered {
        Ok(page) => web::HttpResponse::Unauthorized()
            .content_type("text/html; charset=utf-8")
            .body(page),
        Err(e) => error_response(&state.config, &session, e),
    }
}

#[web::post("/admin/logout")]
pub(crate) async fn logout(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    if let Some(token) = admin_token(&req) {
        state.sessions.logout(&token);
        info!("Admin logged out");
    }

    web::HttpResponse::SeeOther()
        .header("Location", "/")
        .cookie(logout_cookie())
        .finish()
}

#[web::get("/admin")]
pub(crate) async fn dashboard(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let store = &state.store;

    admin_page(&state, &session, "Dashboard", ADMIN_DASHBOARD_TPL, |admin| {
        admin.render_dashboard(store.blogs.all(), store.certifications.all(), store.messages.all())
    })
}
// End: Session region --------

// Begin: Blog region --------
#[web::get("/admin/blogs")]
pub(crate) async fn blogs(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);

    admin_page(&state, &session, "Blog Posts", ADMIN_BLOGS_TPL, |admin| {
        admin.render_blog_list(state.store.blogs.all())
    })
}

#[web::get("/admin/blogs/new")]
pub(crate) async fn new_blog(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let form = BlogForm::new_post(&state.config.site.owner);

    admin_page(&state, &session, "New Blog Post", ADMIN_BLOG_FORM_TPL, |admin| {
        admin.render_blog_form(&form, Editing { existing: None, error: "" }, &state.config.assets.base_url)
    })
}

#[web::get("/admin/blogs/{id}")]
pub(crate) async fn edit_blog(req: HttpRequest, path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    if let Err(e) = require_admin(&session) {
        return error_response(&state.config, &session, e);
    }

    let post = match parse_id(&path, Post::KIND).and_then(|id| state.store.blogs.get(id)) {
        Ok(post) => post,
        Err(e) => return error_response(&state.config, &session, e),
    };
    let form = BlogForm::from_post(post);

    admin_page(&state, &session, "Edit Blog Post", ADMIN_BLOG_FORM_TPL, |admin| {
        admin.render_blog_form(&form, Editing { existing: Some(post), error: "" }, &state.config.assets.base_url)
    })
}

#[web::post("/admin/blogs")]
pub(crate) async fn create_blog(req: HttpRequest, form: web::types::Form<BlogForm>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);
    if let Err(e) = require_admin(&session) {
        return error_response(&state.config, &session, e);
    }

    let post = match form.to_post(None) {
        Ok(post) => post,
        Err(err) => {
            let error = err.to_string();
            return rejected_form(&state, &session, "New Blog Post", ADMIN_BLOG_FORM_TPL, |admin| {
                admin.render_blog_form(&form, Editing { existing: None, error: &error }, &state.config.assets.base_url)
            });
        }
    };

    match state.store.blogs.insert(post) {
        Ok(post) => {
            info!("Created blog post {} [{}]", post.id, post.title);
            see_other("/admin/blogs")
        }
        Err(e) => error_response(&state.config, &session, e),
    }
}

#[web::post("/admin/blogs/{id}")]
pub(crate) async fn update_blog(req: HttpRequest, path: web::types::Path<String>, form: web::types::Form<BlogForm>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);
    if let Err(e) = require_admin(&session) {
        return error_response(&state.config, &session, e);
    }

    let existing = match parse_id(&path, Post::KIND).and_then(|id| state.store.blogs.get(id)) {
        Ok(post) => post.clone(),
        Err(e) => return error_response(&state.config, &session, e),
    };

    let post = match form.to_post(Some(&existing)) {
        Ok(post) => post,
        Err(err) => {
            let error = err.to_string();
            return rejected_form(&state, &session, "Edit Blog Post", ADMIN_BLOG_FORM_TPL, |admin| {
                admin.render_blog_form(&form, Editing { existing: Some(&existing), error: &error }, &state.config.assets.base_url)
            });
        }
    };

    match state.store.blogs.update(existing.id, post) {
        Ok(post) => {
            info!("Updated blog post {} [{}]", post.id, post.title);
            see_other("/admin/blogs")
        }
        Err(e) => error_response(&state.config, &session, e),
    }
}

#[web::post("/admin/blogs/{id}/delete")]
pub(crate) async fn delete_blog(req: HttpRequest, path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);

    let deleted = require_admin(&session)
        .and_then(|_| parse_id(&path, Post::KIND))
        .and_then(|id| state.store.blogs.delete(id));

    match deleted {
        Ok(post) => {
            info!("Deleted blog post {} [{}]", post.id, post.title);
            if let Some(ref thumbnail) = post.thumbnail_path {
                remove_upload(&state.config.paths.uploads_dir, thumbnail);
            }
            see_other("/admin/blogs")
        }
        Err(e) => error_response(&state.config, &session, e),
    }
}

#[web::post("/admin/blogs/{id}/thumbnail")]
pub(crate) async fn upload_thumbnail(req: HttpRequest, path: web::types::Path<String>, body: Bytes, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);

    let stored = require_admin(&session)
        .and_then(|_| parse_id(&path, Post::KIND))
        .and_then(|id| attach_thumbnail(&mut state, id, content_type(&req), &body));

    match stored {
        Ok(url) => uploaded(url),
        Err(e) => error_response(&state.config, &session, e),
    }
}

fn attach_thumbnail(state: &mut AppState, id: u64, content_type: &str, body: &[u8]) -> Result<String> {
    state.store.blogs.get(id)?;
    let uploads_dir = state.config.paths.uploads_dir.clone();
    let stored = save_upload(&uploads_dir, AssetKind::Thumbnail, content_type, body)?;

    let mut replaced = None;
    state.store.blogs.modify(id, |post| replaced = post.thumbnail_path.replace(stored.clone()))?;
    if let Some(old) = replaced {
        remove_upload(&uploads_dir, &old);
    }

    info!("Thumbnail of blog post {} is now {}", id, stored);
    Ok(build_asset_url(&state.config.assets.base_url, Some(&stored)).unwrap_or(stored))
}
// End: Blog region --------

// Begin: Certification region --------
#[web::get("/admin/certifications")]
pub(crate) async fn certifications(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);

    admin_page(&state, &session, "Certifications", ADMIN_CERTIFICATIONS_TPL, |admin| {
        admin.render_certification_list(state.store.certifications.all())
    })
}

#[web::get("/admin/certifications/new")]
pub(crate) async fn new_certification(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let form = CertificationForm::new_certification();

    admin_page(&state, &session, "New Certification", ADMIN_CERTIFICATION_FORM_TPL, |admin| {
        admin.render_certification_form(&form, Editing { existing: None, error: "" }, &state.config.assets.base_url)
    })
}

#[web::get("/admin/certifications/{id}")]
pub(crate) async fn edit_certification(req: HttpRequest, path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    if let Err(e) = require_admin(&session) {
        return error_response(&state.config, &session, e);
    }

    let cert = match parse_id(&path, Certification::KIND).and_then(|id| state.store.certifications.get(id)) {
        Ok(cert) => cert,
        Err(e) => return error_response(&state.config, &session, e),
    };
    let form = CertificationForm::from_certification(cert);

    admin_page(&state, &session, "Edit Certification", ADMIN_CERTIFICATION_FORM_TPL, |admin| {
        admin.render_certification_form(&form, Editing { existing: Some(cert), error: "" }, &state.config.assets.base_url)
    })
}

#[web::post("/admin/certifications")]
pub(crate) async fn create_certification(req: HttpRequest, form: web::types::Form<CertificationForm>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);
    if let Err(e) = require_admin(&session) {
        return error_response(&state.config, &session, e);
    }

    let cert = match form.to_certification(None) {
        Ok(cert) => cert,
        Err(err) => {
            let error = err.to_string();
            return rejected_form(&state, &session, "New Certification", ADMIN_CERTIFICATION_FORM_TPL, |admin| {
                admin.render_certification_form(&form, Editing { existing: None, error: &error }, &state.config.assets.base_url)
            });
        }
    };

    match state.store.certifications.insert(cert) {
        Ok(cert) => {
            info!("Created certification {} [{}]", cert.id, cert.title);
            see_other("/admin/certifications")
        }
        Err(e) => error_response(&state.config, &session, e),
    }
}

#[web::post("/admin/certifications/{id}")]
pub(crate) async fn update_certification(req: HttpRequest, path: web::types::Path<String>, form: web::types::Form<CertificationForm>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);
    if let Err(e) = require_admin(&session) {
        return error_response(&state.config, &session, e);
    }

    let existing = match parse_id(&path, Certification::KIND).and_then(|id| state.store.certifications.get(id)) {
        Ok(cert) => cert.clone(),
        Err(e) => return error_response(&state.config, &session, e),
    };

    let cert = match form.to_certification(Some(&existing)) {
        Ok(cert) => cert,
        Err(err) => {
            let error = err.to_string();
            return rejected_form(&state, &session, "Edit Certification", ADMIN_CERTIFICATION_FORM_TPL, |admin| {
                admin.render_certification_form(&form, Editing { existing: Some(&existing), error: &error }, &state.config.assets.base_url)
            });
        }
    };

    match state.store.certifications.update(existing.id, cert) {
        Ok(cert) => {
            info!("Updated certification {} [{}]", cert.id, cert.title);
            see_other("/admin/certifications")
        }
        Err(e) => error_response(&state.config, &session, e),
    }
}

#[web::post("/admin/certifications/{id}/delete")]
pub(crate) async fn delete_certification(req: HttpRequest, path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);

    let deleted = require_admin(&session)
        .and_then(|_| parse_id(&path, Certification::KIND))
        .and_then(|id| state.store.certifications.delete(id));

    match deleted {
        Ok(cert) => {
            info!("Deleted certification {} [{}]", cert.id, cert.title);
            if let Some(ref image) = cert.image_path {
                remove_upload(&state.config.paths.uploads_dir, image);
            }
            see_other("/admin/certifications")
        }
        Err(e) => error_response(&state.config, &session, e),
    }
}

#[web::post("/admin/certifications/{id}/image")]
pub(crate) async fn upload_certification_image(req: HttpRequest, path: web::types::Path<String>, body: Bytes, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);

    let stored = require_admin(&session)
        .and_then(|_| parse_id(&path, Certification::KIND))
        .and_then(|id| attach_certificate_image(&mut state, id, content_type(&req), &body));

    match stored {
        Ok(url) => uploaded(url),
        Err(e) => error_response(&state.config, &session, e),
    }
}

fn attach_certificate_image(state: &mut AppState, id: u64, content_type: &str, body: &[u8]) -> Result<String> {
    state.store.certifications.get(id)?;
    let uploads_dir = state.config.paths.uploads_dir.clone();
    let stored = save_upload(&uploads_dir, AssetKind::CertificateImage, content_type, body)?;

    let mut replaced = None;
    state.store.certifications.modify(id, |cert| replaced = cert.image_path.replace(stored.clone()))?;
    if let Some(old) = replaced {
        remove_upload(&uploads_dir, &old);
    }

    info!("Image of certification {} is now {}", id, stored);
    Ok(build_asset_url(&state.config.assets.base_url, Some(&stored)).unwrap_or(stored))
}
// End: Certification region --------

// Begin: Profile region --------
#[web::get("/admin/profile")]
pub(crate) async fn profile_page(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let form = state.store.primary_profile()
        .map(ProfileForm::from_profile)
        .unwrap_or_default();

    admin_page(&state, &session, "Profile", ADMIN_PROFILE_TPL, |admin| {
        admin.render_profile(&form, "", false)
    })
}

#[web::post("/admin/profile")]
pub(crate) async fn save_profile(req: HttpRequest, form: web::types::Form<Vec<(String, String)>>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);
    if let Err(e) = require_admin(&session) {
        return error_response(&state.config, &session, e);
    }

    let form = ProfileForm::from_pairs(form.into_inner());
    let profile = match form.to_profile() {
        Ok(profile) => profile,
        Err(err) => {
            let error = err.to_string();
            return rejected_form(&state, &session, "Profile", ADMIN_PROFILE_TPL, |admin| {
                admin.render_profile(&form, &error, false)
            });
        }
    };

    let saved = match state.store.save_primary_profile(profile) {
        Ok(saved) => saved,
        Err(e) => return error_response(&state.config, &session, e),
    };
    info!("Profile {} saved", saved.id);

    let form = ProfileForm::from_profile(&saved);
    admin_page(&state, &session, "Profile", ADMIN_PROFILE_TPL, |admin| {
        admin.render_profile(&form, "", true)
    })
}
// End: Profile region --------

// Begin: CV region --------
#[web::get("/admin/cv")]
pub(crate) async fn cv(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);

    admin_page(&state, &session, "CV Management", ADMIN_CV_TPL, |admin| {
        admin.render_cv(state.store.primary_profile(), &state.config.assets.base_url)
    })
}

#[web::post("/admin/cv")]
pub(crate) async fn upload_cv(req: HttpRequest, body: Bytes, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);

    let stored = require_admin(&session)
        .and_then(|_| attach_cv(&mut state, content_type(&req), &body));

    match stored {
        Ok(url) => uploaded(url),
        Err(e) => error_response(&state.config, &session, e),
    }
}

fn attach_cv(state: &mut AppState, content_type: &str, body: &[u8]) -> Result<String> {
    let Some(profile_id) = state.store.primary_profile().map(|p| p.id) else {
        return Err(ValidationError::invalid("Profile", "must be saved before uploading a CV").into());
    };
    let uploads_dir = state.config.paths.uploads_dir.clone();
    let stored = save_upload(&uploads_dir, AssetKind::Cv, content_type, body)?;

    let mut replaced = None;
    state.store.profiles.modify(profile_id, |profile| replaced = profile.cv_path.replace(stored.clone()))?;
    if let Some(old) = replaced {
        remove_upload(&uploads_dir, &old);
    }

    info!("CV is now {}", stored);
    Ok(build_asset_url(&state.config.assets.base_url, Some(&stored)).unwrap_or(stored))
}
// End: CV region --------
