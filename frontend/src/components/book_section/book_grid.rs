//! 书籍卡片与网格
//!
//! 纯渲染组件，分区页与管理后台共用。

use bookclub_shared::Book;
use leptos::prelude::*;

use crate::components::icons::BookOpen;
use crate::web::router::Link;

/// 单本书的卡片：封面、标题、作者、出版社
///
/// 提供 `href` 时整张卡片可点击进入详情。
#[component]
pub fn BookCard(book: Book, #[prop(optional)] href: Option<String>) -> impl IntoView {
    let cover = match book.book_images.cover_url() {
        Some(url) => view! {
            <img class="h-48 object-contain" src=url.to_string() alt=book.title.clone() />
        }
        .into_any(),
        None => view! {
            <div class="h-48 flex items-center justify-center text-base-content/30">
                <BookOpen attr:class="h-16 w-16" />
            </div>
        }
        .into_any(),
    };

    let body = view! {
        <figure class="pt-4 bg-base-200">{cover}</figure>
        <div class="card-body p-4">
            <h2 class="card-title text-base">{book.title.clone()}</h2>
            <p class="text-sm opacity-70">{book.authors_line()}</p>
            <p class="text-xs opacity-50">{book.publisher.clone()}</p>
        </div>
    };

    match href {
        Some(to) => view! {
            <Link to=to class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                {body}
            </Link>
        }
        .into_any(),
        None => view! { <div class="card bg-base-100 shadow">{body}</div> }.into_any(),
    }
}

/// 响应式网格
///
/// `link_prefix` 存在时每张卡片链接到 `{link_prefix}/{book.id}`。
#[component]
pub fn BookGrid(
    books: Vec<Book>,
    #[prop(optional)] link_prefix: Option<String>,
) -> impl IntoView {
    if books.is_empty() {
        return view! {
            <p class="text-center py-8 text-base-content/50">"No books here yet."</p>
        }
        .into_any();
    }

    view! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-4">
            {books
                .into_iter()
                .map(|book| {
                    let href = link_prefix.as_ref().map(|prefix| format!("{}/{}", prefix, book.id));
                    match href {
                        Some(href) => view! { <BookCard book=book href=href /> }.into_any(),
                        None => view! { <BookCard book=book /> }.into_any(),
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}
