use crate::components::icons::{BookOpen, CircleCheck, Heart, House, Settings};
use crate::web::router::Link;
use leptos::prelude::*;

#[derive(Clone, Copy)]
enum MenuIcon {
    Home,
    Reading,
    Wishlist,
    Completed,
    Settings,
}

const NAV_ITEMS: [(&str, MenuIcon, &str); 5] = [
    ("/home", MenuIcon::Home, "Home"),
    ("/reading", MenuIcon::Reading, "Reading"),
    ("/wishlist", MenuIcon::Wishlist, "Wishlist"),
    ("/completed", MenuIcon::Completed, "Completed"),
    ("/settings", MenuIcon::Settings, "Settings"),
];

fn icon_view(icon: MenuIcon) -> AnyView {
    match icon {
        MenuIcon::Home => view! { <House attr:class="h-5 w-5" /> }.into_any(),
        MenuIcon::Reading => view! { <BookOpen attr:class="h-5 w-5" /> }.into_any(),
        MenuIcon::Wishlist => view! { <Heart attr:class="h-5 w-5" /> }.into_any(),
        MenuIcon::Completed => view! { <CircleCheck attr:class="h-5 w-5" /> }.into_any(),
        MenuIcon::Settings => view! { <Settings attr:class="h-5 w-5" /> }.into_any(),
    }
}

/// 左侧导航菜单，当前分区高亮
#[component]
pub fn LeftMenu() -> impl IntoView {
    view! {
        <aside class="w-64 min-h-full bg-base-100 shadow-xl">
            <div class="p-4 text-xl font-bold">"BookClub"</div>
            <ul class="menu p-2 gap-1">
                {NAV_ITEMS
                    .into_iter()
                    .map(|(to, icon, label)| {
                        view! {
                            <li>
                                <Link to=to class="gap-3" active_class="menu-active">
                                    {icon_view(icon)}
                                    {label}
                                </Link>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </aside>
    }
}
