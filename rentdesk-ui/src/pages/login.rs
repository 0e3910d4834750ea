//! Login Page

use leptos::*;
use leptos_router::*;

use rentdesk::models::Credentials;
use rentdesk::notify::Notification;
use rentdesk::routing::home_for;
use rentdesk::session::Session;

use crate::api;
use crate::components::Field;
use crate::state::GlobalState;

#[component]
pub fn Login() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let api_url = create_rw_signal(api::get_api_base());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        api::set_api_base(&api_url.get_untracked());

        let credentials = Credentials::new(email.get_untracked(), password.get_untracked());
        let navigate = navigate.clone();
        set_submitting.set(true);
        spawn_local(async move {
            match api::login(&credentials).await {
                Ok(response) => {
                    let session = Session::from(response);
                    let home = home_for(&session);
                    state.login(session);
                    state.notify(Notification::login_succeeded());
                    navigate(home.path(), Default::default());
                }
                Err(e) => state.notify(Notification::login_failed(&e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Sign in to RentDesk">
            <form on:submit=on_submit class="space-y-4">
                <Field label="Email" value=email input_type="email" placeholder="you@example.com" />
                <Field label="Password" value=password input_type="password" />

                <details class="text-sm text-gray-500">
                    <summary class="cursor-pointer">"Server"</summary>
                    <div class="mt-2">
                        <Field label="API URL" value=api_url />
                    </div>
                </details>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400 text-white
                           rounded-lg py-2 font-semibold transition-colors"
                >
                    {move || if submitting.get() { "Signing in..." } else { "Login" }}
                </button>
            </form>

            <p class="text-sm text-center text-gray-500 mt-6">
                "No account yet? "
                <A href="/register" class="text-blue-600 hover:underline">"Register"</A>
            </p>
        </AuthCard>
    }
}

/// Centered card used by the login and register pages
#[component]
pub fn AuthCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100">
            <div class="bg-white rounded-xl shadow-lg p-8 w-full max-w-md">
                <div class="text-center mb-6">
                    <div class="text-4xl mb-2">"🏘"</div>
                    <h1 class="text-2xl font-bold">{title}</h1>
                </div>
                {children()}
            </div>
        </div>
    }
}
