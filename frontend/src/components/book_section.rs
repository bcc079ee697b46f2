//! 书架分区页面
//!
//! 左侧是本分区的书目列表，右侧是卡片网格或单本书详情。

use bookclub_shared::{Book, BookStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::web::router::Link;

mod book_detail;
mod book_grid;

pub use book_grid::BookGrid;

use book_detail::BookDetail;

#[component]
pub fn BookSectionPage(status: BookStatus, #[prop(optional)] book_id: Option<i64>) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (books, set_books) = signal(Vec::<Book>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let (Some(token), Some(user)) = (auth.token(), auth.user()) else {
            return;
        };
        let api = api.clone();
        set_loading.set(true);
        spawn_local(async move {
            match api.list_user_books(&token, user.id, Some(status)).await {
                Ok(page) => set_books.set(page.books()),
                Err(err) => {
                    log::warn!("failed to load {} books: {}", status, err);
                    auth.expire_on_rejection(&err);
                    set_error_msg.set(Some(format!("Could not load books: {}", err)));
                }
            }
            set_loading.set(false);
        });
    });

    let base = format!("/{}", status.as_str());

    let menu_base = base.clone();
    let menu = move || {
        books
            .get()
            .into_iter()
            .map(|book| {
                let to = format!("{}/{}", menu_base, book.id);
                view! {
                    <li>
                        <Link to=to active_class="menu-active">{book.title}</Link>
                    </li>
                }
            })
            .collect_view()
    };

    let content = move || {
        if loading.get() {
            return view! {
                <div class="flex justify-center py-12">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            }
            .into_any();
        }

        match book_id {
            Some(id) => match books.with(|list| list.iter().find(|b| b.id == id).cloned()) {
                Some(book) => view! { <BookDetail book=book /> }.into_any(),
                None => view! {
                    <p class="text-center py-8 text-base-content/50">"Book not found in this section."</p>
                }
                .into_any(),
            },
            None => view! { <BookGrid books=books.get() link_prefix=base.clone() /> }.into_any(),
        }
    };

    view! {
        <div class="flex flex-col lg:flex-row gap-6">
            <aside class="lg:w-56 shrink-0">
                <div class="card bg-base-100 shadow">
                    <div class="card-body p-2">
                        <h2 class="menu-title">{status.title()}</h2>
                        <ul class="menu p-0">{menu}</ul>
                    </div>
                </div>
            </aside>
            <section class="flex-1 space-y-4">
                <Show when=move || error_msg.with(Option::is_some)>
                    <div role="alert" class="alert alert-warning">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>
                {content}
            </section>
        </div>
    }
}
