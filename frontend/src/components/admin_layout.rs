//! 管理后台：外壳与书籍管理页

use bookclub_shared::{BookPage, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::book_section::BookGrid;
use crate::components::icons::{BookOpen, ChevronLeft, ChevronRight};
use crate::components::user_layout::UpperNav;
use crate::web::route::ADMIN_PATH;
use crate::web::router::Link;

#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input id="admin-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <UpperNav title="BookClub Admin" drawer_id="admin-drawer" />
                <main class="flex-1 p-4 md:p-8">{children()}</main>
            </div>
            <div class="drawer-side z-40">
                <label for="admin-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
                <aside class="w-64 min-h-full bg-base-100 shadow-xl">
                    <div class="p-4 text-xl font-bold">"Admin Panel"</div>
                    <ul class="menu p-2">
                        <li>
                            <Link to=ADMIN_PATH class="gap-3" active_class="menu-active">
                                <BookOpen attr:class="h-5 w-5" />
                                "Manage Books"
                            </Link>
                        </li>
                    </ul>
                </aside>
            </div>
        </div>
    }
}

/// 全部书籍的分页网格
#[component]
pub fn AdminBooksPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (page, set_page) = signal(DEFAULT_PAGE);
    let (data, set_data) = signal(Option::<BookPage>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 页码变化时重新加载
    Effect::new(move |_| {
        let current = page.get();
        let Some(token) = auth.token() else {
            return;
        };
        let api = api.clone();
        set_loading.set(true);
        spawn_local(async move {
            match api.list_books(&token, current, DEFAULT_PAGE_LIMIT).await {
                Ok(result) => {
                    set_error_msg.set(None);
                    set_data.set(Some(result));
                }
                Err(err) => {
                    log::warn!("failed to load books page {}: {}", current, err);
                    auth.expire_on_rejection(&err);
                    set_error_msg.set(Some(format!("Could not load books: {}", err)));
                }
            }
            set_loading.set(false);
        });
    });

    let has_previous = move || data.with(|d| d.as_ref().is_some_and(BookPage::has_previous));
    let has_next = move || data.with(|d| d.as_ref().is_some_and(BookPage::has_next));
    let summary = move || {
        data.with(|d| match d {
            Some(p) => format!("Page {} of {} · {} books", p.page, p.total_pages.max(1), p.total_items),
            None => String::new(),
        })
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">"Manage Books"</h1>
                <span class="text-sm opacity-70">{summary}</span>
            </div>

            <Show when=move || error_msg.with(Option::is_some)>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || if loading.get() {
                view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                }
                .into_any()
            } else {
                let books = data.with(|d| d.as_ref().map(|p| p.books.clone()).unwrap_or_default());
                view! { <BookGrid books=books /> }.into_any()
            }}

            <div class="join flex justify-center">
                <button
                    class="join-item btn"
                    disabled=move || loading.get() || !has_previous()
                    on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    <ChevronLeft attr:class="h-4 w-4" /> "Previous"
                </button>
                <button
                    class="join-item btn"
                    disabled=move || loading.get() || !has_next()
                    on:click=move |_| set_page.update(|p| *p += 1)
                >
                    "Next" <ChevronRight attr:class="h-4 w-4" />
                </button>
            </div>
        </div>
    }
}
