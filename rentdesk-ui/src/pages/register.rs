//! Register Page
//!
//! New accounts stay pending until an administrator approves them.

use leptos::*;
use leptos_router::*;

use rentdesk::models::Registration;
use rentdesk::notify::Notification;
use rentdesk::routing::Route as AppRoute;
use rentdesk::ApiError;

use crate::api;
use crate::components::Field;
use crate::pages::login::AuthCard;
use crate::state::GlobalState;

#[component]
pub fn Register() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let registration = match Registration::new(
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(registration) => registration,
            Err(e) => {
                state.notify(Notification::registration_failed(&ApiError::from(e)));
                return;
            }
        };

        let navigate = navigate.clone();
        set_submitting.set(true);
        spawn_local(async move {
            match api::register(&registration).await {
                Ok(()) => {
                    state.notify(Notification::registration_succeeded());
                    navigate(AppRoute::Login.path(), Default::default());
                }
                Err(e) => state.notify(Notification::registration_failed(&e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Create an account">
            <form on:submit=on_submit class="space-y-4">
                <Field label="Email" value=email input_type="email" placeholder="you@example.com" />
                <Field label="Password" value=password input_type="password" />
                <Field label="Confirm Password" value=confirm input_type="password" />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400 text-white
                           rounded-lg py-2 font-semibold transition-colors"
                >
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>

            <p class="text-sm text-center text-gray-500 mt-6">
                "Already registered? "
                <A href="/login" class="text-blue-600 hover:underline">"Login"</A>
            </p>
        </AuthCard>
    }
}
