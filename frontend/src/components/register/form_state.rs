//! 注册表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 提交前的本地校验（与后端规则一致）

use std::sync::LazyLock;

use leptos::prelude::*;
use regex::Regex;

const USERNAME_MAX_LEN: usize = 50;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// 通过校验的注册数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.username.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
    }

    /// 读取当前输入并校验
    pub fn to_registration(&self) -> Result<Registration, String> {
        validate(
            &self.username.get_untracked(),
            &self.email.get_untracked(),
            &self.password.get_untracked(),
        )
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    // 后端按字节计算长度
    if username.len() > USERNAME_MAX_LEN {
        return Err(format!(
            "Username cannot be longer than {} characters",
            USERNAME_MAX_LEN
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

/// 按用户名、邮箱、密码的顺序校验，返回第一条错误
///
/// 用户名和邮箱去掉首尾空白后提交，密码原样保留。
pub fn validate(username: &str, email: &str, password: &str) -> Result<Registration, String> {
    let username = username.trim();
    let email = email.trim();

    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)?;

    Ok(Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_well_formed_registration() {
        let reg = validate(" al ", "a@x.com", "pw").unwrap();
        assert_eq!(reg.username, "al");
        assert_eq!(reg.email, "a@x.com");
        assert_eq!(reg.password, "pw");
    }

    #[test]
    fn username_is_required_and_bounded() {
        assert_eq!(validate_username(""), Err("Username is required".to_string()));
        assert!(validate_username(&"a".repeat(50)).is_ok());
        assert!(validate_username(&"a".repeat(51)).is_err());
        // 26 个双字节字符共 52 字节
        assert!(validate_username(&"é".repeat(25)).is_ok());
        assert!(validate_username(&"é".repeat(26)).is_err());
    }

    #[test]
    fn email_must_look_like_an_address() {
        for ok in ["a@x.com", "first.last+tag@mail.example.org", "A_B%c@d-e.io"] {
            assert!(validate_email(ok).is_ok(), "{}", ok);
        }
        for bad in ["", "ax.com", "a@x", "a@x.c", "a b@x.com", "@x.com"] {
            assert!(validate_email(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn reports_the_first_failing_field() {
        assert_eq!(
            validate("", "bad", ""),
            Err("Username is required".to_string())
        );
        assert_eq!(
            validate("al", "bad", ""),
            Err("Invalid email format".to_string())
        );
        assert_eq!(
            validate("al", "a@x.com", ""),
            Err("Password is required".to_string())
        );
    }
}
