//! 认证模块
//!
//! `Session` 是纯粹的状态值，三个转换（恢复、登录、注销）都在这里定义，
//! 不依赖 DOM，可以直接测试。`AuthContext` 把它放进信号里，
//! 通过 Context 在组件间共享，并注入给路由服务。

use bookclub_shared::{AuthToken, Role, User};
use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{BookClubApi, SessionApi};
use crate::error::{SessionError, SessionResult};
use crate::store::{LocalTokenStore, TokenStore};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Anonymous,
    Authenticated,
}

/// 当前客户端实例的认证状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer 令牌，未认证时为空
    pub token: String,
    pub expiry: Option<DateTime<Utc>>,
    pub user: Option<User>,
    /// 仅在启动恢复期间为 true
    pub initializing: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// 进程启动时的初始状态
    pub fn new() -> Self {
        Self {
            token: String::new(),
            expiry: None,
            user: None,
            initializing: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            initializing: false,
            ..Self::new()
        }
    }

    pub fn authenticated(token: AuthToken, user: User) -> Self {
        Self {
            token: token.token,
            expiry: token.expiry,
            user: Some(user),
            initializing: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty() && self.user.is_some()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.initializing {
            SessionPhase::Initializing
        } else if self.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    pub fn role(&self) -> Option<Role> {
        if self.is_authenticated() {
            self.user.as_ref().map(|u| u.role)
        } else {
            None
        }
    }

    /// 显式登录：先更新内存状态，再持久化令牌
    ///
    /// 存储不可用时会话依然在本标签页内生效，错误返回给调用方记录。
    pub fn login<S: TokenStore>(&mut self, store: &S, token: AuthToken, user: User) -> SessionResult<()> {
        let raw = token.token.clone();
        *self = Self::authenticated(token, user);
        store.save(&raw)
    }

    /// 显式注销：总是重置状态，然后清除持久化令牌
    pub fn logout<S: TokenStore>(&mut self, store: &S) -> SessionResult<()> {
        *self = Self::anonymous();
        store.clear()
    }

    /// 应用启动恢复的结果
    ///
    /// 恢复期间如果已经发生了显式登录/注销，迟到的结果被丢弃。
    pub fn apply_restored(&mut self, restored: Session) -> bool {
        if !self.initializing {
            return false;
        }
        *self = restored;
        true
    }
}

/// 启动时从持久化存储恢复会话
///
/// 任何失败都落到匿名状态；令牌被拒绝时同时清除存储，避免反复重试坏令牌。
/// 失败对用户是静默的，只记录日志。
pub async fn restore<S: TokenStore, A: SessionApi>(store: &S, api: &A) -> Session {
    let token = match store.load() {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => return Session::anonymous(),
        Err(err) => {
            log::warn!("session restore skipped: {}", err);
            return Session::anonymous();
        }
    };

    match api.fetch_profile(&token).await {
        Ok(user) => {
            log::info!("session restored for {}", user.username);
            Session::authenticated(AuthToken::new(token), user)
        }
        Err(err) => {
            log::info!("stored session rejected: {}", err);
            if let Err(err) = store.clear() {
                log::warn!("failed to clear rejected token: {}", err);
            }
            Session::anonymous()
        }
    }
}

/// 登录表单使用的完整凭据流程：换取令牌，再用新令牌获取用户
pub async fn sign_in<A: SessionApi>(api: &A, username: &str, password: &str) -> SessionResult<(AuthToken, User)> {
    let token = api.authenticate(username, password).await?;
    let user = api.fetch_profile(&token.token).await?;
    Ok((token, user))
}

// =========================================================
// Leptos 上下文
// =========================================================

/// 认证上下文
///
/// 包含会话信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: RwSignal<Session>,
    restore_started: StoredValue<bool>,
}

impl AuthContext {
    /// 创建新的认证上下文，初始处于 Initializing
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(Session::new()),
            restore_started: StoredValue::new(false),
        }
    }

    /// 会话只读信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user.clone())
    }

    /// 当前令牌（不追踪），未认证时为 None
    pub fn token(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.is_authenticated().then(|| s.token.clone()))
    }

    pub fn login(&self, token: AuthToken, user: User) {
        let username = user.username.clone();
        self.session.update(|s| {
            if let Err(err) = s.login(&LocalTokenStore, token, user) {
                log::warn!("session not persisted: {}", err);
            }
        });
        log::info!("signed in as {}", username);
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务对会话变化的监听自动处理。
    pub fn logout(&self) {
        self.session.update(|s| {
            if let Err(err) = s.logout(&LocalTokenStore) {
                log::warn!("stored token not cleared: {}", err);
            }
        });
        log::info!("signed out");
    }

    /// 受保护请求的令牌被后端拒绝时结束会话，路由随之回到登录页
    pub fn expire_on_rejection(&self, err: &SessionError) {
        if *err == SessionError::InvalidToken {
            log::info!("token rejected by backend, ending session");
            self.logout();
        }
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 启动恢复，每个上下文最多执行一次
pub fn init_auth(ctx: &AuthContext, api: BookClubApi) {
    if ctx.restore_started.get_value() {
        return;
    }
    ctx.restore_started.set_value(true);

    let session = ctx.session;
    spawn_local(async move {
        let restored = restore(&LocalTokenStore, &api).await;
        session.update(|s| {
            if !s.apply_restored(restored) {
                log::debug!("restore result discarded: session changed during restore");
            }
        });
    });
}
