//! 普通用户的外壳：左侧菜单 + 顶栏 + 内容区

use leptos::prelude::*;

mod left_menu;
mod upper_nav;

pub use upper_nav::UpperNav;

use left_menu::LeftMenu;

#[component]
pub fn UserLayout(children: Children) -> impl IntoView {
    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input id="main-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <UpperNav title="BookClub" drawer_id="main-drawer" />
                <main class="flex-1 p-4 md:p-8">{children()}</main>
            </div>
            <div class="drawer-side z-40">
                <label for="main-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
                <LeftMenu />
            </div>
        </div>
    }
}
