use leptos::*;

/// Page title with an "Add" button
#[component]
pub fn PageHeader(
    title: &'static str,
    subtitle: &'static str,
    add_label: &'static str,
    #[prop(into)] on_add: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between">
            <div>
                <h1 class="text-3xl font-bold">{title}</h1>
                <p class="text-gray-500 mt-1">{subtitle}</p>
            </div>
            <button
                on:click=move |_| on_add.call(())
                class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                {add_label}
            </button>
        </div>
    }
}
