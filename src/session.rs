use std::collections::HashSet;

use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use ntex::http::HttpMessage;
use spdlog::debug;
use subtle::ConstantTimeEq;
use uuid::Uuid;

pub const ADMIN_COOKIE: &str = "admin_session";
pub const LIKED_COOKIE: &str = "liked_blog_ids";

/// Ids of the posts this browser already liked. Best effort only, it lives in a cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikedPosts {
    ids: Vec<u64>,
}

impl LikedPosts {
    /// Anything unreadable counts as no likes.
    pub fn from_cookie(value: &str) -> Self {
        let ids: Result<Vec<u64>, _> = value.split('-')
            .filter(|id| !id.is_empty())
            .map(|id| id.parse::<u64>())
            .collect();

        match ids {
            Ok(ids) => LikedPosts { ids },
            Err(e) => {
                debug!("Ignoring liked posts cookie [{}]: {}", value, e);
                LikedPosts::default()
            }
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Returns false when the id was already there.
    pub fn add(&mut self, id: u64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn to_cookie_value(&self) -> String {
        self.ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build((LIKED_COOKIE, self.to_cookie_value()))
            .path("/")
            .max_age(Duration::days(365))
            .same_site(SameSite::Lax)
            .build()
    }
}

/// What a request knows about its visitor, handed explicitly to every view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub admin: bool,
    pub liked: LikedPosts,
}

impl Session {
    pub fn from_request<M: HttpMessage>(req: &M, registry: &SessionRegistry) -> Self {
        let admin = admin_token(req)
            .map(|token| registry.is_valid(&token))
            .unwrap_or(false);
        let liked = req.cookie(LIKED_COOKIE)
            .map(|c| LikedPosts::from_cookie(c.value()))
            .unwrap_or_default();

        Session { admin, liked }
    }
}

/// Admin sessions opened since the server started.
#[derive(Default)]
pub struct SessionRegistry {
    tokens: HashSet<String>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry::default()
    }

    /// Opens a session when the password matches, returning its token.
    pub fn login(&mut self, expected_password: &str, password: &str) -> Option<String> {
        let matches: bool = password.as_bytes().ct_eq(expected_password.as_bytes()).into();
        if password.is_empty() || !matches {
            return None;
        }
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone());
        Some(token)
    }

    pub fn logout(&mut self, token: &str) {
        self.tokens.remove(token);
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

/// Token of the admin session cookie, if the request carries one.
pub fn admin_token<M: HttpMessage>(req: &M) -> Option<String> {
    req.cookie(ADMIN_COOKIE).map(|c| c.value().to_string())
}

pub fn login_cookie(token: &str) -> Cookie<'static> {
    admin_cookie(token.to_string())
}

pub fn logout_cookie() -> Cookie<'static> {
    let mut cookie = admin_cookie(String::new());
    cookie.make_removal();
    cookie
}

fn admin_cookie(value: String) -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

#[cfg(test)]
mod tests {
    use ntex::web::test::TestRequest;

    use super::*;

    #[test]
    fn test_liked_posts() {
        let mut liked = LikedPosts::from_cookie("1-4");
        assert!(liked.contains(4));
        assert!(!liked.contains(2));
        assert!(liked.add(2));
        assert!(!liked.add(2));
        assert_eq!(liked.to_cookie_value(), "1-4-2");
        assert_eq!(LikedPosts::from_cookie(""), LikedPosts::default());
    }

    #[test]
    fn test_broken_liked_cookie_is_empty() {
        assert_eq!(LikedPosts::from_cookie("[1,2]"), LikedPosts::default());
        assert_eq!(LikedPosts::from_cookie("1-x"), LikedPosts::default());
    }

    #[test]
    fn test_liked_cookie() {
        let cookie = LikedPosts::from_cookie("3-7").to_cookie();
        assert_eq!(cookie.name(), LIKED_COOKIE);
        assert_eq!(cookie.value(), "3-7");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(365)));
    }

    #[test]
    fn test_login_logout() {
        let mut registry = SessionRegistry::new();
        assert_eq!(registry.login("secret", "wrong"), None);
        assert_eq!(registry.login("secret", "secre"), None);
        assert_eq!(registry.login("secret", ""), None);

        let token = registry.login("secret", "secret").unwrap();
        let req = TestRequest::get().cookie(login_cookie(&token)).to_http_request();
        assert_eq!(admin_token(&req), Some(token.clone()));
        assert!(Session::from_request(&req, &registry).admin);

        registry.logout(&token);
        assert!(!Session::from_request(&req, &registry).admin);
    }

    #[test]
    fn test_admin_cookies() {
        let cookie = login_cookie("abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));

        let removal = logout_cookie();
        assert_eq!(removal.name(), ADMIN_COOKIE);
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn test_session_from_request() {
        let registry = SessionRegistry::new();
        let req = TestRequest::get().to_http_request();
        assert_eq!(Session::from_request(&req, &registry), Session::default());

        let req = TestRequest::get()
            .cookie(Cookie::new(ADMIN_COOKIE, "forged"))
            .cookie(Cookie::new(LIKED_COOKIE, "3"))
            .to_http_request();
        let session = Session::from_request(&req, &registry);
        assert!(!session.admin);
        assert!(session.liked.contains(3));
    }
}
