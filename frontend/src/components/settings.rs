use crate::auth::use_auth;
use crate::components::icons::{CircleUser, LogOut};
use leptos::prelude::*;

/// 只读的账户信息
#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();

    let field = move |pick: fn(&bookclub_shared::User) -> String| {
        move || auth.user().as_ref().map(pick).unwrap_or_default()
    };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-xl">
            <div class="card-body">
                <div class="flex items-center gap-3">
                    <CircleUser attr:class="h-10 w-10 text-primary" />
                    <h2 class="card-title">"Account"</h2>
                </div>
                <dl class="grid grid-cols-3 gap-y-2 mt-4">
                    <dt class="opacity-70">"Username"</dt>
                    <dd class="col-span-2 font-mono">{field(|u| u.username.clone())}</dd>
                    <dt class="opacity-70">"Email"</dt>
                    <dd class="col-span-2 font-mono">{field(|u| u.email.clone())}</dd>
                    <dt class="opacity-70">"Role"</dt>
                    <dd class="col-span-2">
                        <span class="badge badge-neutral">{field(|u| u.role.to_string())}</span>
                    </dd>
                </dl>
                <div class="card-actions justify-end mt-6">
                    <button on:click=move |_| auth.logout() class="btn btn-outline btn-error gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </div>
        </div>
    }
}
