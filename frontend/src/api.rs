//! 会话客户端
//!
//! 封装对后端的全部调用。每次调用只发送一次，不做重试；
//! HTTP 状态与错误响应体在这里一次性解析成 `SessionError`。

use async_trait::async_trait;
use bookclub_shared::protocol::{
    ApiRequest, CreateTokenRequest, CurrentUserRequest, ListBooksRequest, ListUserBooksRequest,
    RegisterUserRequest,
};
use bookclub_shared::{ApiErrorBody, AuthToken, BookPage, BookStatus, User, UserBookPage};
use leptos::prelude::*;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::{SessionError, SessionResult};
use crate::web::{FetchHttpClient, HttpClient, HttpRequest, HttpResponse};


const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_CONFLICT: u16 = 409;

/// 建立身份所需的三个调用
///
/// 会话上下文只依赖这个 trait，测试中可以替换为内存实现。
#[async_trait(?Send)]
pub trait SessionApi {
    /// 用户名密码换取令牌，非 2xx 一律视为 `InvalidCredentials`
    async fn authenticate(&self, username: &str, password: &str) -> SessionResult<AuthToken>;

    /// 令牌换取当前用户，非 2xx 一律视为 `InvalidToken`
    async fn fetch_profile(&self, token: &str) -> SessionResult<User>;

    async fn register(&self, username: &str, email: &str, password: &str) -> SessionResult<()>;
}

#[derive(Debug, Clone)]
pub struct BookClubApi<C = FetchHttpClient> {
    base_url: String,
    client: C,
}

impl BookClubApi<FetchHttpClient> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            FetchHttpClient::new(config.request_timeout),
        )
    }
}

impl<C: HttpClient> BookClubApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 按端点元数据构建并发送请求，返回原始响应
    async fn execute<R: ApiRequest>(
        &self,
        req: &R,
        token: Option<&str>,
    ) -> SessionResult<HttpResponse> {
        let mut request = HttpRequest::new(self.url(&req.path()), R::METHOD);

        if R::AUTHENTICATED {
            let token = token.ok_or(SessionError::InvalidToken)?;
            request = request.with_bearer(token);
        }

        if R::METHOD.has_body() {
            let body = serde_json_wasm::to_string(req)
                .map_err(|e| SessionError::Unknown(format!("序列化请求失败: {}", e)))?;
            request = request.with_body(body);
        }

        Ok(self.client.send(request).await?)
    }

    /// 已认证的列表接口共用的状态处理
    async fn fetch_authorized<R: ApiRequest>(&self, req: &R, token: &str) -> SessionResult<R::Response> {
        let resp = self.execute(req, Some(token)).await?;
        if resp.status == STATUS_UNAUTHORIZED {
            return Err(SessionError::InvalidToken);
        }
        if !resp.ok() {
            return Err(SessionError::Unknown(error_message(&resp)));
        }
        decode(&resp)
    }

    /// 分页获取全部书籍（管理后台）
    pub async fn list_books(&self, token: &str, page: u32, limit: u32) -> SessionResult<BookPage> {
        self.fetch_authorized(&ListBooksRequest { page, limit }, token)
            .await
    }

    /// 获取用户书架，按阅读状态过滤
    pub async fn list_user_books(
        &self,
        token: &str,
        user_id: i64,
        status: Option<BookStatus>,
    ) -> SessionResult<UserBookPage> {
        self.fetch_authorized(&ListUserBooksRequest::new(user_id, status), token)
            .await
    }
}

/// 从 Context 获取后端客户端
pub fn use_api() -> BookClubApi {
    use_context::<BookClubApi>().expect("BookClubApi should be provided")
}

#[async_trait(?Send)]
impl<C: HttpClient> SessionApi for BookClubApi<C> {
    async fn authenticate(&self, username: &str, password: &str) -> SessionResult<AuthToken> {
        let req = CreateTokenRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self.execute(&req, None).await?;
        if !resp.ok() {
            log::debug!("authentication rejected with status {}", resp.status);
            return Err(SessionError::InvalidCredentials);
        }
        decode::<<CreateTokenRequest as ApiRequest>::Response>(&resp).map(|body| body.auth_token)
    }

    async fn fetch_profile(&self, token: &str) -> SessionResult<User> {
        let resp = self.execute(&CurrentUserRequest, Some(token)).await?;
        if !resp.ok() {
            log::debug!("profile lookup rejected with status {}", resp.status);
            return Err(SessionError::InvalidToken);
        }
        decode(&resp)
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> SessionResult<()> {
        let req = RegisterUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self.execute(&req, None).await?;
        if resp.ok() {
            Ok(())
        } else {
            Err(classify_registration_failure(&resp))
        }
    }
}

fn decode<T: DeserializeOwned>(resp: &HttpResponse) -> SessionResult<T> {
    resp.json()
        .map_err(|e| SessionError::Unknown(format!("响应格式错误: {}", e)))
}

/// 错误响应体中的消息，缺失时退化为状态码
fn error_message(resp: &HttpResponse) -> String {
    match resp.json::<ApiErrorBody>() {
        Ok(body) if !body.error.trim().is_empty() => body.error,
        _ => format!("HTTP {}", resp.status),
    }
}

/// 将注册失败的响应归类为具体的冲突类型
fn classify_registration_failure(resp: &HttpResponse) -> SessionError {
    let message = error_message(resp);
    let normalized = message.trim().to_ascii_lowercase();

    match normalized.as_str() {
        "username already taken" => SessionError::UsernameTaken,
        "email already in use" => SessionError::EmailInUse,
        _ if resp.status == STATUS_CONFLICT && normalized.contains("username") => {
            SessionError::UsernameTaken
        }
        _ if resp.status == STATUS_CONFLICT && normalized.contains("email") => {
            SessionError::EmailInUse
        }
        _ => SessionError::Unknown(message),
    }
}
