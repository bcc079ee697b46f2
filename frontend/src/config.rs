//! 运行时配置
//!
//! WASM 前端没有进程环境变量，所有配置都在构建时通过 `option_env!` 注入，
//! 缺省或非法的值回退到默认值。

use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端地址，不含结尾的 `/`
    pub api_base_url: String,
    /// 单次请求的超时时间，超时视为网络错误
    pub request_timeout: Duration,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

impl AppConfig {
    /// 读取构建时注入的配置
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("BOOKCLUB_API_BASE_URL"),
            option_env!("BOOKCLUB_REQUEST_TIMEOUT_MS"),
            option_env!("BOOKCLUB_LOG_LEVEL"),
        )
    }

    fn from_values(base_url: Option<&str>, timeout_ms: Option<&str>, level: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let request_timeout = timeout_ms
            .and_then(|ms| ms.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));

        let log_level = level
            .and_then(|l| l.trim().parse::<log::Level>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            request_timeout,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.log_level, log::Level::Info);
    }

    #[test]
    fn base_url_loses_trailing_slashes() {
        let config = AppConfig::from_values(Some("https://api.example.com//"), None, None);
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = AppConfig::from_values(Some("   "), Some("soon"), Some("loud"));
        assert_eq!(config, AppConfig::default());

        let zero = AppConfig::from_values(None, Some("0"), None);
        assert_eq!(zero.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn explicit_values_are_honoured() {
        let config = AppConfig::from_values(None, Some("2500"), Some("debug"));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.log_level, log::Level::Debug);
    }
}
