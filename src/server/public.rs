use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{debug, info};

use crate::assets::resolve_upload;
use crate::contact::{submit, Submission};
use crate::forms::ContactForm;
use crate::markup::render;
use crate::model::{Post, Record};
use crate::post_filter::{filter_posts, sort_certifications, tag_universe, FilterState};
use crate::query_string::QueryString;
use crate::server::pages::*;
use crate::server::{lock, parse_id, session_of, SharedState};
use crate::view::certification_renderer::CertificationRenderer;
use crate::view::contact_renderer::{ContactRenderer, Feedback};
use crate::view::cv_renderer::CvRenderer;
use crate::view::home_renderer::HomeRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::message_renderer::Message;
use crate::view::post_renderer::PostRenderer;
use crate::view::project_renderer::ProjectRenderer;

#[web::get("/")]
pub(crate) async fn index(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);

    let rendered = render_page(&state.config, &session, "Home", "/", HOME_TPL, |src| {
        Ok(HomeRenderer::new(src)?.render(state.store.primary_profile()))
    });
    respond(&state.config, &session, rendered)
}

#[web::get("/projects")]
pub(crate) async fn projects(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let base_url = state.config.assets.base_url.as_str();

    let rendered = render_page(&state.config, &session, "Projects", "/projects", PROJECTS_TPL, |src| {
        Ok(ProjectRenderer::new(src)?.render(state.store.projects.all(), base_url))
    });
    respond(&state.config, &session, rendered)
}

fn get_filter_state(req: &HttpRequest) -> FilterState {
    match req.uri().query() {
        Some(query_str) => QueryString::from(query_str).get_filter_state(),
        None => FilterState::default(),
    }
}

#[web::get("/blog")]
pub(crate) async fn blog_list(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let filter = get_filter_state(&req);
    let base_url = state.config.assets.base_url.as_str();

    let posts = state.store.blogs.all();
    let rendered = render_page(&state.config, &session, "Blog", "/blog", BLOG_LIST_TPL, |src| {
        let filtered = filter_posts(posts, &filter);
        debug!("Blog list [{:?}] matched {} of {} posts", filter, filtered.len(), posts.len());
        Ok(ListRenderer::new(src)?.render(&filtered, &tag_universe(posts), &filter, base_url))
    });
    respond(&state.config, &session, rendered)
}

#[web::get("/blog/{id}")]
pub(crate) async fn blog_post(req: HttpRequest, path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let base_url = state.config.assets.base_url.as_str();

    let post = match parse_id(&path, Post::KIND).and_then(|id| state.store.blogs.get(id)) {
        Ok(post) => post,
        Err(e) => return error_response(&state.config, &session, e),
    };

    let rendered = render_page(&state.config, &session, &post.title, "/blog", BLOG_POST_TPL, |src| {
        Ok(PostRenderer::new(src)?.render(post, render(&post.content), &session, base_url))
    });
    respond(&state.config, &session, rendered)
}

#[web::post("/blog/{id}/like")]
pub(crate) async fn like_post(req: HttpRequest, path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let mut session = session_of(&req, &state);

    let id = match parse_id(&path, Post::KIND) {
        Ok(id) => id,
        Err(e) => return error_response(&state.config, &session, e),
    };
    let location = format!("/blog/{}", id);

    if session.liked.contains(id) {
        debug!("Post {} was already liked by this visitor", id);
        return see_other(&location);
    }

    match state.store.like_post(id) {
        Ok(post) => {
            info!("Post {} liked, {} like(s) now", id, post.likes);
            session.liked.add(id);
            web::HttpResponse::SeeOther()
                .header("Location", location)
                .cookie(session.liked.to_cookie())
                .finish()
        }
        Err(e) => error_response(&state.config, &session, e),
    }
}

#[web::get("/certifications")]
pub(crate) async fn certifications(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let base_url = state.config.assets.base_url.as_str();

    let mut sorted = state.store.certifications.all().to_vec();
    sort_certifications(&mut sorted);

    let rendered = render_page(&state.config, &session, "Certifications", "/certifications", CERTIFICATIONS_TPL, |src| {
        Ok(CertificationRenderer::new(src)?.render(&sorted, base_url))
    });
    respond(&state.config, &session, rendered)
}

#[web::get("/cv")]
pub(crate) async fn cv(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    let base_url = state.config.assets.base_url.as_str();

    let rendered = render_page(&state.config, &session, "CV", "/cv", CV_TPL, |src| {
        Ok(CvRenderer::new(src)?.render(state.store.primary_profile(), base_url))
    });
    respond(&state.config, &session, rendered)
}

#[web::get("/contact")]
pub(crate) async fn contact(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);

    let rendered = render_page(&state.config, &session, "Contact", "/contact", CONTACT_TPL, |src| {
        Ok(ContactRenderer::new(src)?.render(state.store.primary_profile(), &ContactForm::default(), None))
    });
    respond(&state.config, &session, rendered)
}

#[web::post("/contact")]
pub(crate) async fn send_contact(req: HttpRequest, form: web::types::Form<ContactForm>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let session = session_of(&req, &state);
    let form = form.into_inner();

    let enabled = state.config.contact_enabled();
    let submission = match submit(enabled, &mut state.store.messages, &form) {
        Ok(submission) => submission,
        Err(e) => return error_response(&state.config, &session, e),
    };

    // A sent message clears the form, anything else gives the visitor their text back
    let shown_form = match submission {
        Submission::Sent(_) => ContactForm::default(),
        _ => form,
    };
    let feedback_text = submission.feedback();
    let feedback = Feedback {
        message: &feedback_text,
        success: submission.is_sent(),
    };

    let rendered = render_page(&state.config, &session, "Contact", "/contact", CONTACT_TPL, |src| {
        Ok(ContactRenderer::new(src)?.render(state.store.primary_profile(), &shown_form, Some(feedback)))
    });
    respond(&state.config, &session, rendered)
}

#[web::get("/uploads/{dir}/{file}")]
pub(crate) async fn uploaded_files(path: web::types::Path<(String, String)>, state: SharedState) -> Result<NamedFile, web::Error> {
    let (dir, file) = path.into_inner();
    let state = lock(&state);

    let Some(file_path) = resolve_upload(&state.config.paths.uploads_dir, &format!("{}/{}", dir, file)) else {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    };

    Ok(NamedFile::open(file_path)?)
}

#[web::get("/public/{file_name}")]
pub(crate) async fn public_files(path: web::types::Path<String>, state: SharedState) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let state = lock(&state);
    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

pub(crate) async fn not_found(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let session = session_of(&req, &state);
    debug!("No route for {}", req.path());
    not_found_page(&state.config, &session, &Message::page_not_found())
}
