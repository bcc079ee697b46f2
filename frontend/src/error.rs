//! 会话错误类型
//!
//! 所有后端与存储失败在客户端边界被解析为 `SessionError`，
//! 页面只根据错误种类选择提示文案，不再解析原始字符串。

use thiserror::Error;

use crate::web::HttpError;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Invalid username or password.";
pub const USERNAME_TAKEN_MESSAGE: &str = "Username is already taken";
pub const EMAIL_IN_USE_MESSAGE: &str = "Email is already in use";
const NETWORK_MESSAGE: &str = "Unable to reach the server. Please try again.";
const LOGIN_RETRY_MESSAGE: &str = "Login failed. Please try again.";
const REGISTER_RETRY_MESSAGE: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("username already taken")]
    UsernameTaken,

    #[error("email already in use")]
    EmailInUse,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

impl SessionError {
    /// 登录表单展示的单行提示
    pub fn login_message(&self) -> &'static str {
        match self {
            SessionError::InvalidCredentials | SessionError::InvalidToken => LOGIN_FAILED_MESSAGE,
            SessionError::NetworkError(_) => NETWORK_MESSAGE,
            _ => LOGIN_RETRY_MESSAGE,
        }
    }

    /// 注册表单展示的单行提示
    pub fn register_message(&self) -> &'static str {
        match self {
            SessionError::UsernameTaken => USERNAME_TAKEN_MESSAGE,
            SessionError::EmailInUse => EMAIL_IN_USE_MESSAGE,
            SessionError::NetworkError(_) => NETWORK_MESSAGE,
            _ => REGISTER_RETRY_MESSAGE,
        }
    }
}

impl From<HttpError> for SessionError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::RequestBuildFailed(msg) => SessionError::Unknown(msg),
            other => SessionError::NetworkError(other.to_string()),
        }
    }
}
