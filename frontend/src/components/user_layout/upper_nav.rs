use crate::auth::use_auth;
use crate::components::icons::{CircleUser, LogOut};
use leptos::prelude::*;

/// 顶栏：标题、当前用户名和注销按钮
///
/// 用户与管理员布局共用。注销后由路由服务负责跳转到登录页。
#[component]
pub fn UpperNav(title: &'static str, drawer_id: &'static str) -> impl IntoView {
    let auth = use_auth();

    let username = move || auth.user().map(|u| u.username).unwrap_or_default();
    let on_logout = move |_| auth.logout();

    view! {
        <div class="navbar bg-base-100 shadow">
            <div class="flex-none lg:hidden">
                <label for=drawer_id aria-label="open sidebar" class="btn btn-square btn-ghost">
                    <svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" class="inline-block h-6 w-6 stroke-current"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"></path></svg>
                </label>
            </div>
            <div class="flex-1 px-2 text-xl font-semibold">{title}</div>
            <div class="flex-none gap-2">
                <span class="hidden md:inline-flex items-center gap-2 text-sm opacity-80">
                    <CircleUser attr:class="h-5 w-5" />
                    {username}
                </span>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Logout"
                </button>
            </div>
        </div>
    }
}
