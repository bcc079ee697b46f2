use crate::{AuthTokenResponse, BookPage, BookStatus, User, UserBookPage};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// 该方法是否携带 JSON 请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the endpoint expects `Authorization: Bearer <token>`.
    const AUTHENTICATED: bool;

    /// Full path including path parameters and query string.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTokenRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for CreateTokenRequest {
    type Response = AuthTokenResponse;
    const PATH: &'static str = "/tokens/authentication";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

/// Resolve the profile that owns the bearer token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = User;
    const PATH: &'static str = "/me";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;
}

/// Create a new account
///
/// The created user in the response body is not needed by the client; only
/// the status and, on failure, the error body are inspected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterUserRequest {
    type Response = User;
    const PATH: &'static str = "/users";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

/// Paginated catalogue listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListBooksRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for ListBooksRequest {
    fn default() -> Self {
        Self {
            page: crate::DEFAULT_PAGE,
            limit: crate::DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ApiRequest for ListBooksRequest {
    type Response = BookPage;
    const PATH: &'static str = "/books";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("{}?page={}&limit={}", Self::PATH, self.page.max(1), self.limit.max(1))
    }
}

/// A user's shelf, optionally filtered by reading status
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListUserBooksRequest {
    pub user_id: i64,
    pub status: Option<BookStatus>,
    pub page: u32,
    pub limit: u32,
}

impl ListUserBooksRequest {
    pub fn new(user_id: i64, status: Option<BookStatus>) -> Self {
        Self {
            user_id,
            status,
            page: crate::DEFAULT_PAGE,
            limit: crate::DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ApiRequest for ListUserBooksRequest {
    type Response = UserBookPage;
    const PATH: &'static str = "/users/{user_id}/books";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        let mut path = format!(
            "/users/{}/books?page={}&limit={}",
            self.user_id,
            self.page.max(1),
            self.limit.max(1)
        );
        if let Some(status) = self.status {
            path.push_str("&status=");
            path.push_str(status.as_str());
        }
        path
    }
}
