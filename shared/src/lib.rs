use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod date;
pub mod protocol;

pub use date::JsonDate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 持久化会话令牌所用的存储键
pub const STORAGE_TOKEN_KEY: &str = "authToken";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 后端分页默认值
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

// =========================================================
// 用户与令牌 (Users & Tokens)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// 不透明的 Bearer 令牌及其过期时间
///
/// 令牌内容从不被解析，只原样回传给后端。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expiry: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokenResponse {
    pub auth_token: AuthToken,
}

/// 后端统一的错误响应体 `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

// =========================================================
// 书籍 (Books)
// =========================================================

/// 阅读状态，同时决定分区页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Reading,
    Wishlist,
    Completed,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [
        BookStatus::Reading,
        BookStatus::Wishlist,
        BookStatus::Completed,
    ];

    /// 查询参数与 URL 段使用的标识
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Reading => "reading",
            BookStatus::Wishlist => "wishlist",
            BookStatus::Completed => "completed",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BookStatus::Reading => "Reading",
            BookStatus::Wishlist => "Wishlist",
            BookStatus::Completed => "Completed",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == segment)
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookImages {
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub small_url: Option<String>,
    #[serde(default)]
    pub medium_url: Option<String>,
    #[serde(default)]
    pub large_url: Option<String>,
}

impl BookImages {
    /// 卡片封面：优先缩略图，依次退化到更大的尺寸
    pub fn cover_url(&self) -> Option<&str> {
        self.thumbnail_url
            .as_deref()
            .or(self.small_url.as_deref())
            .or(self.medium_url.as_deref())
            .or(self.large_url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub id: Option<i64>,
    pub number: i32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub page_count: Option<i32>,
    #[serde(default)]
    pub isbn_10: Option<String>,
    #[serde(default)]
    pub isbn_13: String,
    #[serde(default)]
    pub book_images: BookImages,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub published_date: JsonDate,
}

impl Book {
    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }
}

/// `GET /books` 的分页响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPage {
    #[serde(default)]
    pub books: Vec<Book>,
    pub limit: u32,
    pub page: u32,
    pub total_items: u32,
    pub total_pages: u32,
}

impl BookPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// 用户书架中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBook {
    pub id: i64,
    pub user_id: i64,
    pub status: BookStatus,
    #[serde(default)]
    pub updated_at: JsonDate,
    #[serde(default)]
    pub book: Option<Book>,
}

/// `GET /users/{user_id}/books` 的分页响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBookPage {
    #[serde(default)]
    pub user_books: Vec<UserBook>,
    pub page: u32,
    pub limit: u32,
}

impl UserBookPage {
    /// 只保留带有书籍详情的记录
    pub fn books(&self) -> Vec<Book> {
        self.user_books
            .iter()
            .filter_map(|ub| ub.book.clone())
            .collect()
    }

    pub fn count(&self, status: BookStatus) -> usize {
        self.user_books
            .iter()
            .filter(|ub| ub.status == status)
            .count()
    }
}
