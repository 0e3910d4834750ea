//! Chart Component
//!
//! Monthly income vs expense bars drawn on an HTML5 canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use rentdesk::models::{format_money, ChartData};

const INCOME_COLOR: &str = "#16a34a";
const EXPENSE_COLOR: &str = "#dc2626";

/// Grouped bar chart of the dashboard series
#[component]
pub fn Chart(#[prop(into)] data: Signal<ChartData>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let data = data.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &data);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="320"
                class="w-full h-64 md:h-80"
            />

            <div class="flex justify-center gap-6 mt-4">
                <LegendItem color=INCOME_COLOR label="Income" />
                <LegendItem color=EXPENSE_COLOR label="Expenses" />
            </div>
        </div>
    }
}

#[component]
fn LegendItem(color: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div class="w-3 h-3 rounded-sm" style=format!("background-color: {}", color) />
            <span class="text-sm text-gray-600">{label}</span>
        </div>
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, data: &ChartData) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 70.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let rows = data.rows();
    if rows.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data to display", width / 2.0 - 70.0, height / 2.0);
        return;
    }

    let max = match data.max_value() {
        m if m > 0.0 => m * 1.1,
        _ => 1.0,
    };

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = max - (i as f64 / 4.0) * max;
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format_money(value), 5.0, y + 4.0);
    }

    let group_width = chart_width / rows.len() as f64;
    let bar_width = (group_width * 0.35).min(40.0);
    let scale = |value: f64| (value.max(0.0) / max) * chart_height;

    for (i, row) in rows.iter().enumerate() {
        let center = margin_left + group_width * (i as f64 + 0.5);
        let baseline = margin_top + chart_height;

        let income = scale(row.income);
        ctx.set_fill_style(&INCOME_COLOR.into());
        ctx.fill_rect(center - bar_width, baseline - income, bar_width, income);

        let expenses = scale(row.expenses);
        ctx.set_fill_style(&EXPENSE_COLOR.into());
        ctx.fill_rect(center, baseline - expenses, bar_width, expenses);

        ctx.set_fill_style(&"#374151".into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&row.label, center - 12.0, height - 15.0);
    }
}
