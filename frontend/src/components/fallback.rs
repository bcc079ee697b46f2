use leptos::prelude::*;

/// 会话恢复期间的全屏占位
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 布局内的 404
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-24">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
            </div>
        </div>
    }
}
