//! Table helpers

use leptos::*;

use rentdesk::listing::SortConfig;

/// Clickable column header showing the active sort direction
#[component]
pub fn SortHeader<K>(label: &'static str, key: K, sort: RwSignal<Option<SortConfig<K>>>) -> impl IntoView
where
    K: Copy + PartialEq + 'static,
{
    let on_click = move |_| {
        sort.update(|current| match current {
            Some(config) => config.toggle(key),
            None => *current = Some(SortConfig::ascending(key)),
        })
    };

    view! {
        <th
            on:click=on_click
            class="px-4 py-3 text-left text-xs font-semibold uppercase text-gray-500 cursor-pointer select-none hover:text-gray-900"
        >
            {label}
            <span class="ml-1">
                {move || {
                    sort.with(|s| s.as_ref().and_then(|s| s.indicator(key)).map(|d| d.arrow()).unwrap_or(""))
                }}
            </span>
        </th>
    }
}

/// Search box bound to a signal
#[component]
pub fn SearchBox(value: RwSignal<String>, placeholder: &'static str) -> impl IntoView {
    view! {
        <input
            type="search"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
            class="w-full md:w-72 rounded-lg px-3 py-2 border border-gray-300 focus:border-blue-500 focus:outline-none"
        />
    }
}
