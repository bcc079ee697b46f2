use crate::api::{SessionApi, use_api};
use crate::components::flash::use_flash;
use crate::components::icons::{CircleAlert, Library};
use crate::web::route::LOGIN_PATH;
use crate::web::router::{Link, use_navigate};
use leptos::prelude::*;
use leptos::task::spawn_local;

mod form_state;

use form_state::FormState;

const REGISTERED_MESSAGE: &str = "Account created. Please log in.";

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let flash = use_flash();
    let navigate = use_navigate();

    let state = FormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 注册不会改变会话，成功后回到登录页
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let registration = match state.to_registration() {
            Ok(reg) => reg,
            Err(msg) => {
                set_error_msg.set(Some(msg));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api
                .register(
                    &registration.username,
                    &registration.email,
                    &registration.password,
                )
                .await;
            set_is_submitting.set(false);
            match result {
                Ok(()) => {
                    log::info!("registered {}", registration.username);
                    state.reset();
                    flash.show(REGISTERED_MESSAGE);
                    navigate(LOGIN_PATH);
                }
                Err(err) => {
                    log::info!("registration failed: {}", err);
                    set_error_msg.set(Some(err.register_message().to_string()));
                }
            }
        });
    };

    let disabled = move || is_submitting.get();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Library attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create an account"</h1>
                        <p class="text-base-content/70">"Join the BookClub"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <CircleAlert attr:class="h-5 w-5" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="reg_username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="reg_username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| state.username.set(event_target_value(&ev))
                                prop:value=move || state.username.get()
                                disabled=disabled
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="reg_email"
                                type="email"
                                autocomplete="email"
                                placeholder="you@example.com"
                                on:input=move |ev| state.email.set(event_target_value(&ev))
                                prop:value=move || state.email.get()
                                disabled=disabled
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="reg_password"
                                type="password"
                                autocomplete="new-password"
                                placeholder="••••••••"
                                on:input=move |ev| state.password.set(event_target_value(&ev))
                                prop:value=move || state.password.get()
                                disabled=disabled
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=disabled>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link to=LOGIN_PATH class="link link-primary">"Log in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
