//! Modal dialog shell and form building blocks

use leptos::*;

/// Centered dialog over a dimmed backdrop
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-40">
            <div class="bg-white rounded-xl p-6 w-full max-w-lg mx-4 shadow-xl">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-xl font-semibold">{title}</h2>
                    <button
                        on:click=move |_| on_close.call(())
                        class="text-gray-400 hover:text-gray-700"
                    >
                        "✕"
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// Labelled text-like input bound to a signal
#[component]
pub fn Field(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-1">{label}</label>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class="w-full rounded-lg px-3 py-2 border border-gray-300
                       focus:border-blue-500 focus:outline-none"
            />
        </div>
    }
}

/// Cancel and submit buttons of a modal form
#[component]
pub fn FormButtons(
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] submitting: Signal<bool>,
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex space-x-3 pt-4">
            <button
                type="button"
                on:click=move |_| on_cancel.call(())
                class="flex-1 px-4 py-2 bg-gray-100 hover:bg-gray-200 rounded-lg font-medium transition-colors"
            >
                "Cancel"
            </button>
            <button
                type="submit"
                disabled=move || submitting.get()
                class="flex-1 px-4 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400
                       text-white rounded-lg font-medium transition-colors"
            >
                {move || if submitting.get() { "Saving..." } else { label }}
            </button>
        </div>
    }
}

/// Labelled select bound to a signal; options are `(value, label)` pairs
#[component]
pub fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(default = "Select...")] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-1">{label}</label>
            <select
                on:change=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
                class="w-full rounded-lg px-3 py-2 border border-gray-300
                       focus:border-blue-500 focus:outline-none"
            >
                <option value="">{placeholder}</option>
                {move || options.get().into_iter().map(|(v, l)| {
                    let selected = v == value.get_untracked();
                    view! { <option value=v selected=selected>{l}</option> }
                }).collect_view()}
            </select>
        </div>
    }
}
