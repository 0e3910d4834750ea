//! Receipt modal with print support

use leptos::*;

use rentdesk::models::format_money;
use rentdesk::receipt::{Receipt, RECEIPT_FOOTER, SIGNATORY};

use crate::components::Modal;

/// Receipt number in 0..1_000_000
pub fn random_receipt_number() -> u32 {
    (js_sys::Math::random() * 1_000_000.0) as u32
}

/// Preview of a receipt with a print button
#[component]
pub fn ReceiptModal(receipt: Receipt, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let html = receipt.render_html();
    let print = move |_| {
        if let Err(e) = print_document(&html) {
            web_sys::console::error_1(&format!("Failed to print receipt: {:?}", e).into());
        }
    };

    view! {
        <Modal title="Receipt" on_close=on_close>
            <div class="space-y-3 text-sm">
                <div class="flex justify-between">
                    <div>
                        <p class="text-gray-500">"Receipt No."</p>
                        <p class="font-semibold">{receipt.number}</p>
                    </div>
                    <div class="text-right">
                        <p class="text-gray-500">"Date"</p>
                        <p class="font-semibold">{receipt.issued_on_display()}</p>
                    </div>
                </div>
                <hr />
                {receipt.details().into_iter().map(|(label, value)| view! {
                    <div class="flex justify-between">
                        <span class="text-gray-500">{label}":"</span>
                        <span class="font-medium">{value}</span>
                    </div>
                }).collect_view()}
                <hr />
                <div class="flex justify-between text-lg">
                    <span class="font-semibold">"Amount Paid:"</span>
                    <span class="font-bold text-green-600">{format_money(receipt.amount)}</span>
                </div>
                <hr />
                <p class="text-center text-gray-500 italic">{RECEIPT_FOOTER}</p>
                <div class="text-right">
                    <p class="italic text-gray-500">"Signature"</p>
                    <p class="inline-block border-t border-gray-400 pt-1">{SIGNATORY}</p>
                </div>
            </div>

            <div class="flex space-x-3 pt-6">
                <button
                    on:click=move |_| on_close.call(())
                    class="flex-1 px-4 py-2 bg-gray-100 hover:bg-gray-200 rounded-lg font-medium"
                >
                    "Close"
                </button>
                <button
                    on:click=print
                    class="flex-1 px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium"
                >
                    "Print"
                </button>
            </div>
        </Modal>
    }
}

/// Open the standalone receipt document in a new window and print it
fn print_document(html: &str) -> Result<(), wasm_bindgen::JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let popup = window
        .open_with_url_and_target("", "_blank")?
        .ok_or("popup blocked")?;
    let root = popup
        .document()
        .and_then(|d| d.document_element())
        .ok_or("no document")?;
    root.set_inner_html(html);
    popup.focus()?;
    popup.print()?;
    Ok(())
}
