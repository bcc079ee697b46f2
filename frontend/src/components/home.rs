use crate::api::use_api;
use crate::auth::use_auth;
use crate::web::router::Link;
use bookclub_shared::{BookStatus, UserBookPage};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (shelf, set_shelf) = signal(Option::<UserBookPage>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 初始加载：不带状态过滤的书架，用于统计各分区数量
    Effect::new(move |_| {
        let (Some(token), Some(user)) = (auth.token(), auth.user()) else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            match api.list_user_books(&token, user.id, None).await {
                Ok(page) => set_shelf.set(Some(page)),
                Err(err) => {
                    log::warn!("failed to load shelf: {}", err);
                    auth.expire_on_rejection(&err);
                    set_error_msg.set(Some(format!("Could not load your books: {}", err)));
                }
            }
        });
    });

    let greeting = move || {
        auth.user()
            .map(|u| format!("Welcome back, {}!", u.username))
            .unwrap_or_default()
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">{greeting}</h1>

            <Show when=move || error_msg.with(Option::is_some)>
                <div role="alert" class="alert alert-warning">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                {BookStatus::ALL
                    .into_iter()
                    .map(|status| {
                        let count = move || {
                            shelf.with(|s| match s {
                                Some(page) => page.count(status).to_string(),
                                None => "…".to_string(),
                            })
                        };
                        view! {
                            <div class="stat">
                                <div class="stat-title">{status.title()}</div>
                                <div class="stat-value text-primary">{count}</div>
                                <div class="stat-actions">
                                    <Link to=format!("/{}", status.as_str()) class="btn btn-sm btn-ghost">
                                        "Open"
                                    </Link>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
