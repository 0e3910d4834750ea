//! Expenses Page

use leptos::*;

use rentdesk::models::{format_money, Expense, ExpenseDraft};

use crate::components::{Field, FormButtons, Loading, Modal, PageHeader};
use crate::state::{use_records, FormMode, Records};

#[component]
pub fn Expenses() -> impl IntoView {
    let records = use_records::<Expense>();

    let total = move || records.items.with(|items| items.iter().map(|e| e.amount).sum::<f64>());

    view! {
        <div class="space-y-6">
            <PageHeader
                title="Expenses"
                subtitle="Maintenance, taxes and other operating costs"
                add_label="+ Add Expense"
                on_add=move |_| records.open_create()
            />

            {move || records.form.get().map(|_| view! { <ExpenseForm records=records /> })}

            <div class="bg-white rounded-xl shadow overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            {["Description", "Category", "Date", "Amount", ""]
                                .into_iter()
                                .map(|h| view! {
                                    <th class="px-4 py-3 text-left text-xs font-semibold uppercase text-gray-500">{h}</th>
                                })
                                .collect_view()}
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-100">
                        {move || records.items.get().into_iter().map(|expense| {
                            let id = expense.id;
                            view! {
                                <tr class="hover:bg-gray-50">
                                    <td class="px-4 py-3 font-medium">{expense.description}</td>
                                    <td class="px-4 py-3">{expense.category}</td>
                                    <td class="px-4 py-3">{expense.date.to_string()}</td>
                                    <td class="px-4 py-3 text-red-600">{format_money(expense.amount)}</td>
                                    <td class="px-4 py-3 text-right space-x-2 whitespace-nowrap">
                                        <button on:click=move |_| records.open_edit(id) class="text-blue-600 hover:underline">
                                            "Edit"
                                        </button>
                                        <button on:click=move |_| records.delete(id) class="text-red-600 hover:underline">
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                    <tfoot class="bg-gray-50">
                        <tr>
                            <td class="px-4 py-3 font-semibold" colspan="3">"Total"</td>
                            <td class="px-4 py-3 font-semibold text-red-600">{move || format_money(total())}</td>
                            <td />
                        </tr>
                    </tfoot>
                </table>
                {move || {
                    if records.loading.get() && records.items.with(Vec::is_empty) {
                        view! { <Loading /> }.into_view()
                    } else if records.items.with(Vec::is_empty) {
                        view! { <p class="text-center text-gray-500 py-8">"No expenses recorded."</p> }.into_view()
                    } else {
                        ().into_view()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn ExpenseForm(records: Records<Expense>) -> impl IntoView {
    let initial = records.initial();
    let field = |f: fn(&ExpenseDraft) -> String| {
        create_rw_signal(initial.as_ref().map(f).unwrap_or_default())
    };
    let description = field(|d| d.description.clone());
    let amount = field(|d| d.amount.to_string());
    let date = field(|d| d.date.to_string());
    let category = field(|d| d.category.clone());

    let editing = matches!(records.form.get_untracked(), Some(FormMode::Edit(_)));
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        records.submit(ExpenseDraft::from_form(
            &description.get_untracked(),
            &amount.get_untracked(),
            &date.get_untracked(),
            &category.get_untracked(),
        ));
    };

    view! {
        <Modal title=if editing { "Edit Expense" } else { "Add Expense" } on_close=move |_| records.close()>
            <form on:submit=on_submit class="space-y-4">
                <Field label="Description" value=description placeholder="e.g., Roof repair" />
                <Field label="Amount" value=amount input_type="number" />
                <Field label="Date" value=date input_type="date" />
                <Field label="Category" value=category placeholder="e.g., Maintenance" />
                <FormButtons
                    on_cancel=move |_| records.close()
                    submitting=records.submitting
                    label=if editing { "Update" } else { "Add" }
                />
            </form>
        </Modal>
    }
}
