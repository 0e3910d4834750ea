//! Toast Notification Component
//!
//! Shows queued notifications in the corner until they expire.

use leptos::*;

use rentdesk::notify::NotificationLevel;

use crate::state::{GlobalState, ToastEntry};

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2">
            <For
                each=move || state.toasts.get()
                key=|entry| entry.id
                children=move |entry| view! { <ToastMessage entry=entry /> }
            />
        </div>
    }
}

fn style(level: NotificationLevel) -> (&'static str, &'static str) {
    match level {
        NotificationLevel::Success => ("✓", "bg-green-600"),
        NotificationLevel::Info => ("ℹ", "bg-blue-600"),
        NotificationLevel::Warning => ("⚠", "bg-yellow-600"),
        NotificationLevel::Error => ("✕", "bg-red-600"),
    }
}

#[component]
fn ToastMessage(entry: ToastEntry) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let (icon, bg_class) = style(entry.notification.level);
    let id = entry.id;

    view! {
        <div class=format!(
            "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg max-w-sm",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <div class="flex-1">
                <p class="text-sm font-semibold">{entry.notification.title}</p>
                {entry.notification.description.map(|d| view! {
                    <p class="text-sm opacity-90">{d}</p>
                })}
            </div>
            <button
                on:click=move |_| state.dismiss(id)
                class="text-white/70 hover:text-white"
            >
                "✕"
            </button>
        </div>
    }
}
