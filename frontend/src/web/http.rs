//! HTTP 请求封装模块
//!
//! `HttpClient` 是会话客户端与浏览器之间的接缝：
//! 生产环境使用 `FetchHttpClient`（`web_sys::fetch` + 超时），
//! 测试中替换为内存实现。

use async_trait::async_trait;
use bookclub_shared::protocol::HttpMethod;
use bookclub_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use futures::future::{Either, select};
use serde::de::DeserializeOwned;
use std::pin::pin;
use std::time::Duration;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::timer::delay;

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败
    #[error("网络错误: {0}")]
    NetworkError(String),
    /// 超过配置的超时时间
    #[error("请求超时 ({0} ms)")]
    Timeout(u128),
    /// 响应读取失败
    #[error("响应解析失败: {0}")]
    ResponseParseFailed(String),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// 所有请求默认携带 JSON Content-Type
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: vec![(HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string())],
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token))
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    #[cfg(test)]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json_wasm::from_str(&self.body)
            .map_err(|e| HttpError::ResponseParseFailed(e.to_string()))
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器中的 future 不是 Send 的，因此使用 `?Send`。
#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: Fetch 客户端 (Production)
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct FetchHttpClient {
    timeout: Duration,
}

impl FetchHttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn fetch(req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value.dyn_into().map_err(|e| {
            HttpError::ResponseParseFailed(format!("Response 类型转换失败: {:?}", e))
        })?;

        let status = response.status();
        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;
        let body = text
            .as_string()
            .ok_or_else(|| HttpError::ResponseParseFailed("无法转换为字符串".to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let request = pin!(Self::fetch(req));
        let timer = pin!(delay(self.timeout));

        match select(request, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(HttpError::Timeout(self.timeout.as_millis())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_default_to_json_content_type() {
        let req = HttpRequest::new("http://x/me", HttpMethod::Get).with_bearer("abc");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("Authorization"), Some("Bearer abc"));
        assert!(req.body.is_none());
    }

    #[test]
    fn only_2xx_is_ok() {
        let ok = HttpResponse { status: 204, body: String::new() };
        let redirect = HttpResponse { status: 302, body: String::new() };
        let denied = HttpResponse { status: 401, body: String::new() };
        assert!(ok.ok());
        assert!(!redirect.ok());
        assert!(!denied.ok());
    }

    #[test]
    fn malformed_json_is_a_parse_failure() {
        let resp = HttpResponse { status: 200, body: "not json".into() };
        assert!(matches!(
            resp.json::<bookclub_shared::User>(),
            Err(HttpError::ResponseParseFailed(_))
        ));
    }
}
