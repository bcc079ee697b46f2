//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 守卫决策全部委托给 `route::resolve`，这里只负责把结果同步到地址栏和信号。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{RouteDecision, normalize_path, resolve};
use crate::auth::Session;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 会话信号由外部注入，路由器本身不依赖认证上下文。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路径（已规范化）
    path: ReadSignal<String>,
    set_path: WriteSignal<String>,
    /// 注入的会话信号
    session: Signal<Session>,
    /// 当前路径与会话对应的渲染决策
    decision: Memo<RouteDecision>,
}

impl RouterService {
    fn new(session: Signal<Session>) -> Self {
        let (path, set_path) = signal(normalize_path(&current_path()));
        let decision = Memo::new(move |_| session.with(|s| resolve(&path.get(), s).decision));

        Self {
            path,
            set_path,
            session,
            decision,
        }
    }

    pub fn current_path(&self) -> ReadSignal<String> {
        self.path
    }

    pub fn decision(&self) -> Memo<RouteDecision> {
        self.decision
    }

    /// **核心方法：导航与守卫**
    ///
    /// 先在当前会话下解析目标，历史记录中只留下最终落地的路径。
    pub fn navigate(&self, path: &str) {
        let resolution = self.session.with_untracked(|s| resolve(path, s));
        if resolution.hops > 0 {
            log::debug!("[Router] {} redirected to {}", path, resolution.path);
        }
        if resolution.path == self.path.get_untracked() {
            return;
        }
        push_history_state(&resolution.path);
        self.set_path.set(resolution.path);
    }

    /// 初始化浏览器后退/前进按钮监听
    ///
    /// 只同步路径，守卫由 `setup_guard` 统一执行。
    fn init_popstate_listener(&self) {
        let set_path = self.set_path;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_path.set(normalize_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 路径或会话变化时重新执行守卫
    ///
    /// 登录、注销、恢复完成都会触发，重定向以替换历史记录的方式落地。
    fn setup_guard(&self) {
        let path = self.path;
        let set_path = self.set_path;
        let session = self.session;

        Effect::new(move |_| {
            let current = path.get();
            let resolution = session.with(|s| resolve(&current, s));

            if let RouteDecision::RedirectTo(target) = resolution.decision {
                log::warn!("[Router] redirect chain from {} stopped at {}", current, target);
            }

            if resolution.path != current {
                log::debug!("[Router] guard redirect: {} -> {}", current, resolution.path);
                replace_history_state(&resolution.path);
                set_path.set(resolution.path);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_guard();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号
    session: Signal<Session>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前决策渲染对应的组件，决策未变化时不会重新渲染。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收守卫决策，返回对应视图
    matcher: fn(RouteDecision) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.decision().get())
}

/// 站内链接，拦截点击改为客户端导航
///
/// 当前路径等于或位于目标之下时追加 `active_class`。
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional)] class: &'static str,
    #[prop(optional)] active_class: &'static str,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = normalize_path(&to);

    let is_active = {
        let target = target.clone();
        move || {
            router.current_path().with(|current| {
                current == &target || current.starts_with(&format!("{}/", target))
            })
        }
    };

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a
            href=to
            class=move || if is_active() { format!("{} {}", class, active_class) } else { class.to_string() }
            on:click=on_click
        >
            {children()}
        </a>
    }
}
