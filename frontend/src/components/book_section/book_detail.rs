use bookclub_shared::Book;
use leptos::prelude::*;

#[component]
pub fn BookDetail(book: Book) -> impl IntoView {
    let published = if book.published_date.is_empty() {
        "Unknown".to_string()
    } else {
        book.published_date.to_string()
    };
    let cover = book.book_images.cover_url().map(str::to_string);
    let authors = book.authors_line();
    let isbn = Some(book.isbn_13).filter(|isbn| !isbn.is_empty());

    let chapters = (!book.chapters.is_empty()).then(|| {
        view! {
            <h3 class="font-semibold mt-4">"Chapters"</h3>
            <ul class="text-sm space-y-1">
                {book
                    .chapters
                    .into_iter()
                    .map(|c| view! { <li>{format!("{}. {}", c.number, c.title)}</li> })
                    .collect_view()}
            </ul>
        }
    });

    view! {
        <div class="card lg:card-side bg-base-100 shadow-xl">
            {cover.map(|url| view! {
                <figure class="p-6 bg-base-200">
                    <img class="max-h-80 object-contain" src=url alt="cover" />
                </figure>
            })}
            <div class="card-body">
                <h2 class="card-title text-2xl">{book.title}</h2>
                <p class="opacity-80">{authors}</p>
                <div class="text-sm opacity-70 space-y-1">
                    <p>"Publisher: " {book.publisher}</p>
                    <p>"Published: " {published}</p>
                    {book.page_count.map(|n| view! { <p>"Pages: " {n}</p> })}
                    {isbn.map(|isbn| view! { <p>"ISBN-13: " {isbn}</p> })}
                </div>
                <p class="mt-4 whitespace-pre-line">{book.description}</p>
                {chapters}
            </div>
        </div>
    }
}
