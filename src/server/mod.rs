use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use ntex::web;
use ntex::web::HttpRequest;
use spdlog::info;

use crate::config::Config;
use crate::session::{Session, SessionRegistry};
use crate::store::Store;

mod admin;
mod pages;
mod public;

const MAX_FORM_BYTES: usize = 512 * 1024;

pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub sessions: SessionRegistry,
}

type SharedState = web::types::State<Arc<Mutex<AppState>>>;

/// Poisoning is ignored, the state is still usable after a handler panicked.
fn lock(state: &Arc<Mutex<AppState>>) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn session_of(req: &HttpRequest, state: &AppState) -> Session {
    Session::from_request(req, &state.sessions)
}

fn parse_id(id: &str, kind: &'static str) -> crate::error::Result<u64> {
    id.parse::<u64>().map_err(|_| crate::error::FolioError::not_found(kind, 0))
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let store = Store::open(&config.paths.data_dir).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    info!("{} posts, {} certifications, {} projects loaded",
        store.blogs.all().len(), store.certifications.all().len(), store.projects.all().len());

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let max_upload_bytes = config.assets.max_upload_bytes;
    let app_state = Arc::new(Mutex::new(AppState {
        config,
        store,
        sessions: SessionRegistry::new(),
    }));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .state(web::types::PayloadConfig::new(max_upload_bytes))
            .state(web::types::FormConfig::default().limit(MAX_FORM_BYTES))
            .service(public::index)
            .service(public::public_files)
            .service(public::uploaded_files)
            .service(public::projects)
            .service(public::blog_list)
            .service(public::blog_post)
            .service(public::like_post)
            .service(public::certifications)
            .service(public::cv)
            .service(public::contact)
            .service(public::send_contact)
            .service(admin::login_page)
            .service(admin::login)
            .service(admin::logout)
            .service(admin::dashboard)
            .service(admin::blogs)
            .service(admin::new_blog)
            .service(admin::edit_blog)
            .service(admin::create_blog)
            .service(admin::update_blog)
            .service(admin::delete_blog)
            .service(admin::upload_thumbnail)
            .service(admin::certifications)
            .service(admin::new_certification)
            .service(admin::edit_certification)
            .service(admin::create_certification)
            .service(admin::update_certification)
            .service(admin::delete_certification)
            .service(admin::upload_certification_image)
            .service(admin::profile_page)
            .service(admin::save_profile)
            .service(admin::cv)
            .service(admin::upload_cv)
            .default_service(web::route().to(public::not_found))
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use cookie::Cookie;
    use ntex::http::StatusCode;
    use ntex::web::test::{call_service, init_service, TestRequest};
    use ntex::web::{App, WebResponse};

    use crate::config::test_config::config_in;
    use crate::model::post::test_posts::post;
    use crate::session::{login_cookie, ADMIN_COOKIE, LIKED_COOKIE};

    use super::*;

    fn app_state(dir: &Path) -> Arc<Mutex<AppState>> {
        let config = config_in(dir);
        let mut store = Store::open(&config.paths.data_dir).unwrap();
        store.blogs.insert(post(0, "Go", &["go"])).unwrap();
        Arc::new(Mutex::new(AppState {
            config,
            store,
            sessions: SessionRegistry::new(),
        }))
    }

    fn header<'a>(resp: &'a WebResponse, name: &str) -> Option<&'a str> {
        resp.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[ntex::test]
    async fn test_like_post() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path());
        let app = init_service(App::new().state(state.clone()).service(public::like_post)).await;

        let resp = call_service(&app, TestRequest::post().uri("/blog/1/like").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(header(&resp, "location"), Some("/blog/1"));
        let set_cookie = header(&resp, "set-cookie").unwrap();
        assert!(set_cookie.starts_with(&format!("{}=1", LIKED_COOKIE)), "{}", set_cookie);
        assert_eq!(lock(&state).store.blogs.get(1).unwrap().likes, 1);

        // Already in the cookie, nothing is counted
        let req = TestRequest::post()
            .uri("/blog/1/like")
            .cookie(Cookie::new(LIKED_COOKIE, "1"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(header(&resp, "location"), Some("/blog/1"));
        assert_eq!(header(&resp, "set-cookie"), None);
        assert_eq!(lock(&state).store.blogs.get(1).unwrap().likes, 1);

        let req = TestRequest::post()
            .uri("/blog/1/like")
            .cookie(Cookie::new(LIKED_COOKIE, "4"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert!(header(&resp, "set-cookie").unwrap().starts_with(&format!("{}=4-1", LIKED_COOKIE)));
        assert_eq!(lock(&state).store.blogs.get(1).unwrap().likes, 2);
    }

    #[ntex::test]
    async fn test_admin_routes_need_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path());
        let app = init_service(App::new()
            .state(state.clone())
            .service(admin::dashboard)
            .service(admin::blogs)
            .service(admin::delete_blog)).await;

        for req in [
            TestRequest::get().uri("/admin").to_request(),
            TestRequest::get().uri("/admin/blogs").to_request(),
            TestRequest::post().uri("/admin/blogs/1/delete").to_request(),
            TestRequest::get().uri("/admin").cookie(Cookie::new(ADMIN_COOKIE, "forged")).to_request(),
        ] {
            let resp = call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(header(&resp, "location"), Some("/admin/login"));
        }
        assert!(lock(&state).store.blogs.get(1).is_ok());

        let token = lock(&state).sessions.login("secret", "secret").unwrap();
        let req = TestRequest::get().uri("/admin").cookie(login_cookie(&token)).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[ntex::test]
    async fn test_login() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path());
        let app = init_service(App::new().state(state.clone()).service(admin::login)).await;

        let req = TestRequest::post().uri("/admin/login").set_form(&vec![("password", "wrong")]).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(header(&resp, "set-cookie"), None);

        let req = TestRequest::post().uri("/admin/login").set_form(&vec![("password", "secret")]).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(header(&resp, "location"), Some("/admin"));
        let set_cookie = header(&resp, "set-cookie").unwrap();
        assert!(set_cookie.starts_with(&format!("{}=", ADMIN_COOKIE)));
        assert!(set_cookie.contains("HttpOnly"));
    }

    #[ntex::test]
    async fn test_save_profile() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path());
        let token = lock(&state).sessions.login("secret", "secret").unwrap();
        let app = init_service(App::new()
            .state(state.clone())
            .service(admin::profile_page)
            .service(admin::save_profile)).await;

        let req = TestRequest::get().uri("/admin/profile").cookie(login_cookie(&token)).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

        let form = vec![
            ("name", "Jane Doe"),
            ("title", "Developer"),
            ("email", "jane@example.com"),
            ("stack_name", "Backend"),
            ("stack_technologies", "Rust, Go"),
        ];
        let req = TestRequest::post().uri("/admin/profile").cookie(login_cookie(&token)).set_form(&form).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

        let state = lock(&state);
        let profile = state.store.primary_profile().unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.stacks[0].technologies, vec!["Rust".to_string(), "Go".to_string()]);
    }
}
