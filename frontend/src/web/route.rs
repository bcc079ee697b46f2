//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由，以及 `(路径, 会话)` 到渲染决策的守卫函数。

use std::fmt::Display;

use bookclub_shared::{BookStatus, Role};

use crate::auth::{Session, SessionPhase};

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const ROOT_PATH: &str = "/";
pub const HOME_PATH: &str = "/home";
pub const SETTINGS_PATH: &str = "/settings";
pub const ADMIN_PATH: &str = "/admin";
pub const ADMIN_BOOKS_PATH: &str = "/admin/books";

/// 单次导航允许跟随的最大重定向次数
pub const MAX_REDIRECTS: usize = 4;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Login,
    Register,
    /// 根路径，只作为重定向入口
    Root,
    Home,
    /// 按阅读状态划分的书架分区
    Section(BookStatus),
    /// 分区内的书籍详情
    SectionBook(BookStatus, i64),
    Settings,
    /// 管理后台首页即书籍管理
    AdminBooks,
    /// 页面未找到，保留规范化后的路径
    NotFound(String),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = normalize_path(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["home"] => Self::Home,
            ["settings"] => Self::Settings,
            ["admin"] | ["admin", "books"] => Self::AdminBooks,
            [section] => match BookStatus::from_segment(section) {
                Some(status) => Self::Section(status),
                None => Self::NotFound(path),
            },
            [section, id] => match (BookStatus::from_segment(section), id.parse::<i64>()) {
                (Some(status), Ok(id)) => Self::SectionBook(status, id),
                _ => Self::NotFound(path),
            },
            _ => Self::NotFound(path),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::Register => REGISTER_PATH.to_string(),
            Self::Root => ROOT_PATH.to_string(),
            Self::Home => HOME_PATH.to_string(),
            Self::Section(status) => format!("/{}", status.as_str()),
            Self::SectionBook(status, id) => format!("/{}/{}", status.as_str(), id),
            Self::Settings => SETTINGS_PATH.to_string(),
            Self::AdminBooks => ADMIN_BOOKS_PATH.to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 是否位于 `/admin` 之下，包括其中未知的子路径
    pub fn is_admin_area(&self) -> bool {
        match self {
            Self::AdminBooks => true,
            Self::NotFound(path) => path.split('/').find(|s| !s.is_empty()) == Some("admin"),
            _ => false,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 未认证时可见的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicPage {
    Login,
    Register,
}

/// 受保护内容所在的外壳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 左侧菜单 + 顶栏
    User,
    Admin,
}

/// 守卫的输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// 会话恢复中，所有路径都渲染加载占位
    Loading,
    RenderPublic(PublicPage),
    RedirectTo(&'static str),
    RenderProtected(Layout, AppRoute),
}

/// 去掉查询串和片段，合并重复斜杠并去掉末尾斜杠
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let segments: Vec<&str> = path[..end]
        .trim()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

/// **核心守卫逻辑**
///
/// 按顺序匹配，第一条命中即返回。只读取参数，相同输入总是得到相同决策。
pub fn decide(path: &str, session: &Session) -> RouteDecision {
    let role = match session.phase() {
        SessionPhase::Initializing => return RouteDecision::Loading,
        SessionPhase::Anonymous => {
            return match AppRoute::from_path(path) {
                AppRoute::Login => RouteDecision::RenderPublic(PublicPage::Login),
                AppRoute::Register => RouteDecision::RenderPublic(PublicPage::Register),
                _ => RouteDecision::RedirectTo(LOGIN_PATH),
            };
        }
        // Authenticated 保证 user 存在
        SessionPhase::Authenticated => session.role().unwrap_or_default(),
    };

    let route = AppRoute::from_path(path);
    if route.is_public() {
        return RouteDecision::RedirectTo(ROOT_PATH);
    }

    // 区域只看解析结果，与路由表使用同一套规范化
    match role {
        Role::Admin if route.is_admin_area() => {
            RouteDecision::RenderProtected(Layout::Admin, route)
        }
        Role::Admin => RouteDecision::RedirectTo(ADMIN_PATH),
        Role::User if route.is_admin_area() => RouteDecision::RedirectTo(HOME_PATH),
        Role::User => match route {
            AppRoute::Root => RouteDecision::RedirectTo(HOME_PATH),
            route => RouteDecision::RenderProtected(Layout::User, route),
        },
    }
}

/// 跟随重定向链后的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// 最终应显示在地址栏中的路径
    pub path: String,
    pub decision: RouteDecision,
    pub hops: usize,
}

/// 反复应用 `decide` 直到得到非重定向决策，最多跟随 `MAX_REDIRECTS` 次
pub fn resolve(path: &str, session: &Session) -> Resolution {
    let mut current = normalize_path(path);
    let mut decision = decide(&current, session);
    let mut hops = 0;

    while let RouteDecision::RedirectTo(target) = decision {
        if hops == MAX_REDIRECTS {
            break;
        }
        current = target.to_string();
        decision = decide(&current, session);
        hops += 1;
    }

    Resolution {
        path: current,
        decision,
        hops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookclub_shared::{AuthToken, User};

    fn user_session(role: Role) -> Session {
        Session::authenticated(
            AuthToken::new("abc"),
            User {
                id: 1,
                username: "al".into(),
                email: "a@x.com".into(),
                role,
            },
        )
    }

    #[test]
    fn parses_paths_ignoring_query_and_trailing_slash() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Root);
        assert_eq!(AppRoute::from_path(""), AppRoute::Root);
        assert_eq!(AppRoute::from_path("/login?next=/home"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/home/"), AppRoute::Home);
        assert_eq!(
            AppRoute::from_path("/wishlist#top"),
            AppRoute::Section(BookStatus::Wishlist)
        );
        assert_eq!(
            AppRoute::from_path("/reading/42"),
            AppRoute::SectionBook(BookStatus::Reading, 42)
        );
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::AdminBooks);
        assert_eq!(AppRoute::from_path("/admin/books"), AppRoute::AdminBooks);
        assert_eq!(
            AppRoute::from_path("/reading/abc"),
            AppRoute::NotFound("/reading/abc".into())
        );
        assert_eq!(
            AppRoute::from_path("/nope"),
            AppRoute::NotFound("/nope".into())
        );
    }

    #[test]
    fn to_path_round_trips_known_routes() {
        for route in [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Home,
            AppRoute::Section(BookStatus::Completed),
            AppRoute::SectionBook(BookStatus::Wishlist, 7),
            AppRoute::Settings,
            AppRoute::AdminBooks,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn normalize_path_handles_edge_cases() {
        assert_eq!(normalize_path("/home///"), "/home");
        assert_eq!(normalize_path("?x=1"), "/");
        assert_eq!(normalize_path("settings"), "/settings");
        assert_eq!(normalize_path("//admin//books/"), "/admin/books");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn admin_area_covers_unknown_admin_subpaths() {
        assert!(AppRoute::AdminBooks.is_admin_area());
        assert!(AppRoute::from_path("/admin/users").is_admin_area());
        assert!(AppRoute::from_path("//admin//users").is_admin_area());
        assert!(!AppRoute::from_path("/administrator").is_admin_area());
        assert!(!AppRoute::from_path("/nope/admin").is_admin_area());
        assert!(!AppRoute::Home.is_admin_area());
    }

    #[test]
    fn initializing_renders_loading_everywhere() {
        let session = Session::new();
        for path in ["/", "/login", "/home", "/admin", "/nope"] {
            assert_eq!(decide(path, &session), RouteDecision::Loading);
        }
    }

    #[test]
    fn anonymous_sees_only_public_pages() {
        let session = Session::anonymous();
        assert_eq!(
            decide("/login", &session),
            RouteDecision::RenderPublic(PublicPage::Login)
        );
        assert_eq!(
            decide("/register", &session),
            RouteDecision::RenderPublic(PublicPage::Register)
        );
        for path in ["/", "/home", "/settings", "/admin", "/nope"] {
            assert_eq!(decide(path, &session), RouteDecision::RedirectTo("/login"));
        }
    }

    #[test]
    fn authenticated_leaves_public_pages() {
        for role in [Role::User, Role::Admin] {
            let session = user_session(role);
            assert_eq!(decide("/login", &session), RouteDecision::RedirectTo("/"));
            assert_eq!(decide("/register", &session), RouteDecision::RedirectTo("/"));
        }
    }

    #[test]
    fn user_root_goes_home_and_sections_render_in_user_layout() {
        let session = user_session(Role::User);
        assert_eq!(decide("/", &session), RouteDecision::RedirectTo("/home"));
        assert_eq!(
            decide("/home", &session),
            RouteDecision::RenderProtected(Layout::User, AppRoute::Home)
        );
        assert_eq!(
            decide("/completed", &session),
            RouteDecision::RenderProtected(Layout::User, AppRoute::Section(BookStatus::Completed))
        );
        assert_eq!(
            decide("/settings", &session),
            RouteDecision::RenderProtected(Layout::User, AppRoute::Settings)
        );
    }

    #[test]
    fn role_mismatch_redirects_to_own_home() {
        let user = user_session(Role::User);
        assert_eq!(decide("/admin", &user), RouteDecision::RedirectTo("/home"));
        assert_eq!(decide("/admin/books", &user), RouteDecision::RedirectTo("/home"));
        for path in ["//admin", "//admin/books", "/admin//books", "//admin//users/"] {
            assert_eq!(decide(path, &user), RouteDecision::RedirectTo("/home"), "{}", path);
        }

        let admin = user_session(Role::Admin);
        for path in ["/", "/home", "/reading", "/settings", "/nope", "//home"] {
            assert_eq!(decide(path, &admin), RouteDecision::RedirectTo("/admin"));
        }
        for path in ["/admin", "//admin", "//admin/books", "/admin//books/"] {
            assert_eq!(
                decide(path, &admin),
                RouteDecision::RenderProtected(Layout::Admin, AppRoute::AdminBooks),
                "{}",
                path
            );
        }
        assert_eq!(
            resolve("//admin/books", &user).decision,
            RouteDecision::RenderProtected(Layout::User, AppRoute::Home)
        );
    }

    #[test]
    fn unknown_paths_render_not_found_inside_layout() {
        let user = user_session(Role::User);
        assert_eq!(
            decide("/nope", &user),
            RouteDecision::RenderProtected(Layout::User, AppRoute::NotFound("/nope".into()))
        );

        let admin = user_session(Role::Admin);
        assert_eq!(
            decide("/admin/users", &admin),
            RouteDecision::RenderProtected(Layout::Admin, AppRoute::NotFound("/admin/users".into()))
        );
    }

    #[test]
    fn decide_is_deterministic() {
        let sessions = [
            Session::new(),
            Session::anonymous(),
            user_session(Role::User),
            user_session(Role::Admin),
        ];
        for session in &sessions {
            for path in ["/", "/login", "/home", "/admin", "/reading/3", "/x/y/z"] {
                assert_eq!(decide(path, session), decide(path, &session.clone()));
            }
        }
    }

    #[test]
    fn resolve_follows_redirect_chains_to_a_render() {
        let user = resolve("/login", &user_session(Role::User));
        assert_eq!(user.path, "/home");
        assert_eq!(user.hops, 2);
        assert_eq!(
            user.decision,
            RouteDecision::RenderProtected(Layout::User, AppRoute::Home)
        );

        let admin = resolve("/home", &user_session(Role::Admin));
        assert_eq!(admin.path, "/admin");
        assert_eq!(admin.hops, 1);

        let anonymous = resolve("/home", &Session::anonymous());
        assert_eq!(anonymous.path, "/login");
        assert_eq!(
            anonymous.decision,
            RouteDecision::RenderPublic(PublicPage::Login)
        );
    }

    #[test]
    fn every_path_resolves_within_the_redirect_bound() {
        let sessions = [
            Session::anonymous(),
            user_session(Role::User),
            user_session(Role::Admin),
        ];
        for session in &sessions {
            for path in ["/", "/login", "/register", "/home", "/admin", "/admin/x", "/nope"] {
                let resolution = resolve(path, session);
                assert!(resolution.hops <= MAX_REDIRECTS);
                assert!(!matches!(resolution.decision, RouteDecision::RedirectTo(_)));
            }
        }
    }

    #[test]
    fn resolve_while_initializing_keeps_the_path() {
        let resolution = resolve("/reading/", &Session::new());
        assert_eq!(resolution.path, "/reading");
        assert_eq!(resolution.decision, RouteDecision::Loading);
        assert_eq!(resolution.hops, 0);
    }
}
