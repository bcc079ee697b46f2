//! BookClub 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `auth`: 会话状态与三个转换（恢复、登录、注销）
//! - `api`: 后端调用，错误在此边界归类
//! - `store`: 令牌持久化
//! - `web::route`: 路由定义与守卫（纯函数）
//! - `web::router`: 路由服务（核心引擎）
//! - `components`: UI 组件层

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod store;

mod components {
    pub mod admin_layout;
    pub mod book_section;
    pub mod fallback;
    pub mod flash;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod register;
    pub mod settings;
    pub mod user_layout;
}

use crate::api::BookClubApi;
use crate::auth::{AuthContext, init_auth};
use crate::components::admin_layout::{AdminBooksPage, AdminLayout};
use crate::components::book_section::BookSectionPage;
use crate::components::fallback::{LoadingScreen, NotFoundPage};
use crate::components::flash::FlashContext;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::settings::SettingsPage;
use crate::components::user_layout::UserLayout;
use crate::config::AppConfig;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::{FetchHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse};
    pub use storage::LocalStorage;
}

use web::route::{AppRoute, Layout, PublicPage, RouteDecision};
use web::router::{Router, RouterOutlet};

/// 受保护布局内的页面
fn protected_page(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Section(status) => view! { <BookSectionPage status=status /> }.into_any(),
        AppRoute::SectionBook(status, id) => {
            view! { <BookSectionPage status=status book_id=id /> }.into_any()
        }
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::AdminBooks => view! { <AdminBooksPage /> }.into_any(),
        // 其余路由不会以受保护决策出现，按未找到处理
        _ => view! { <NotFoundPage /> }.into_any(),
    }
}

/// 路由匹配函数
///
/// 根据守卫决策返回对应的视图组件。
fn route_matcher(decision: RouteDecision) -> AnyView {
    match decision {
        RouteDecision::Loading => view! { <LoadingScreen /> }.into_any(),
        RouteDecision::RenderPublic(PublicPage::Login) => view! { <LoginPage /> }.into_any(),
        RouteDecision::RenderPublic(PublicPage::Register) => view! { <RegisterPage /> }.into_any(),
        // 路由服务会立即替换地址，这一帧不渲染内容
        RouteDecision::RedirectTo(_) => ().into_any(),
        RouteDecision::RenderProtected(Layout::User, route) => {
            view! { <UserLayout>{protected_page(route)}</UserLayout> }.into_any()
        }
        RouteDecision::RenderProtected(Layout::Admin, route) => {
            view! { <AdminLayout>{protected_page(route)}</AdminLayout> }.into_any()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    let api = BookClubApi::from_config(&config);
    provide_context(api.clone());
    provide_context(FlashContext::new());

    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 从持久化存储恢复会话（异步，最多一次）
    init_auth(&auth_ctx, api);

    // 3. 会话信号注入路由服务
    let session = auth_ctx.session_signal();

    view! {
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
