//! Payment receipts
//!
//! A receipt is a pure view of a paid invoice. It never touches the server:
//! the CLI prints it or writes it as a standalone HTML file, the browser
//! opens the same HTML in a new window and prints it.

use chrono::NaiveDate;
use std::fmt::Write as _;
use thiserror::Error;

use crate::models::{format_money, EnrichedInvoice, InvoiceStatus, RecordId, NOT_AVAILABLE};

/// Payment method line; invoices do not record how they were paid
pub const PAYMENT_METHOD_PLACEHOLDER: &str = "Cash / Bank / Transfer";

pub const RECEIPT_FOOTER: &str = "This is a digital receipt for your payment.";

pub const SIGNATORY: &str = "Rental Manager";

const DISPLAY_DATE: &str = "%m/%d/%Y";

/// Inline stylesheet of the printable document
pub const PRINT_CSS: &str = r#"@media print { body { -webkit-print-color-adjust: exact; } }
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; padding: 20px; }
.receipt-container { background-color: white; padding: 20px; border: 1px solid #e2e8f0; border-radius: 8px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); max-width: 560px; margin: 0 auto; }
.header { color: #2563EB; font-weight: bold; font-size: 24px; text-align: center; margin-bottom: 20px; }
.row { display: flex; justify-content: space-between; margin: 8px 0; }
.title { font-size: 16px; font-weight: 500; color: #1E293B; }
.value { font-size: 16px; color: #1E293B; font-weight: 400; }
.amount { font-size: 32px; font-weight: bold; color: #16A34A; }
.total { text-align: center; }
.footer { text-align: center; font-size: 14px; color: #475569; margin-top: 32px; }
hr { border: none; border-top: 1px dashed #ccc; margin: 20px 0; }
.signature { margin-top: 40px; text-align: center; }
.signature .line { display: inline-block; border-top: 1px solid #475569; padding: 4px 16px 0; }"#;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReceiptError {
    #[error("Invoice {id} is {status}; receipts are only issued for paid invoices")]
    NotPaid { id: RecordId, status: InvoiceStatus },
}

/// A rendered-on-demand receipt for one paid invoice
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub number: u32,
    pub issued_on: NaiveDate,
    pub invoice_id: RecordId,
    pub property_name: String,
    pub tenant_name: String,
    pub paid_date: Option<NaiveDate>,
    pub amount: f64,
}

impl Receipt {
    /// Build a receipt; only paid invoices qualify
    pub fn for_invoice(
        invoice: &EnrichedInvoice,
        number: u32,
        issued_on: NaiveDate,
    ) -> Result<Self, ReceiptError> {
        if !invoice.invoice.is_paid() {
            return Err(ReceiptError::NotPaid {
                id: invoice.invoice.id,
                status: invoice.invoice.status,
            });
        }

        Ok(Self {
            number,
            issued_on,
            invoice_id: invoice.invoice.id,
            property_name: non_blank(&invoice.property_name),
            tenant_name: non_blank(&invoice.tenant_name),
            paid_date: invoice.invoice.paid_date,
            amount: invoice.invoice.amount,
        })
    }

    /// Receipt number in 0..1_000_000
    #[cfg(feature = "native")]
    pub fn random_number() -> u32 {
        (uuid::Uuid::new_v4().as_u128() % 1_000_000) as u32
    }

    pub fn file_name(&self) -> String {
        format!("receipt-{}.html", self.invoice_id)
    }

    pub fn paid_on_display(&self) -> String {
        self.paid_date
            .map(|d| d.format(DISPLAY_DATE).to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn issued_on_display(&self) -> String {
        self.issued_on.format(DISPLAY_DATE).to_string()
    }

    /// Label/value pairs of the detail section, in display order
    pub fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Property", self.property_name.clone()),
            ("Tenant Name", self.tenant_name.clone()),
            ("Payment Method", PAYMENT_METHOD_PLACEHOLDER.to_string()),
            ("Date Paid", self.paid_on_display()),
        ]
    }

    /// Plain-text rendering for terminals
    pub fn render_text(&self) -> String {
        const WIDTH: usize = 44;
        let rule = "-".repeat(WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{:^WIDTH$}", "RECEIPT");
        let _ = writeln!(out, "{}", "=".repeat(WIDTH));
        let left = format!("Receipt No. {}", self.number);
        let right = format!("Date {}", self.issued_on_display());
        let _ = writeln!(out, "{:<w$}{}", left, right, w = WIDTH - right.len());
        let _ = writeln!(out, "{}", rule);

        for (label, value) in self.details() {
            let label = format!("{}:", label);
            let _ = writeln!(out, "{:<18}{:>w$}", label, value, w = WIDTH - 18);
        }

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "{:<18}{:>w$}",
            "Amount Paid:",
            format_money(self.amount),
            w = WIDTH - 18
        );
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out);
        let _ = writeln!(out, "{:^WIDTH$}", RECEIPT_FOOTER);
        let _ = writeln!(out);
        let _ = writeln!(out, "{:^WIDTH$}", "Signature");
        let _ = writeln!(out, "{:^WIDTH$}", "________________");
        let _ = writeln!(out, "{:^WIDTH$}", SIGNATORY);
        out
    }

    /// Body markup of the receipt, without the surrounding document
    pub fn render_fragment(&self) -> String {
        let mut out = String::new();
        out.push_str("<div class=\"receipt-container\">\n");
        out.push_str("  <div class=\"header\">Receipt</div>\n");
        let _ = writeln!(
            out,
            "  <div class=\"row\"><div><div class=\"title\">Receipt No.</div><div class=\"value\">{}</div></div>\
             <div style=\"text-align:right\"><div class=\"title\">Date</div><div class=\"value\">{}</div></div></div>",
            self.number,
            self.issued_on_display()
        );
        out.push_str("  <hr>\n");
        for (label, value) in self.details() {
            let _ = writeln!(
                out,
                "  <div class=\"row\"><span class=\"title\">{}:</span><span class=\"value\">{}</span></div>",
                label,
                escape_html(&value)
            );
        }
        out.push_str("  <hr>\n");
        let _ = writeln!(
            out,
            "  <div class=\"total\"><span class=\"title\">Amount Paid:</span> <span class=\"amount\">{}</span></div>",
            format_money(self.amount)
        );
        out.push_str("  <hr>\n");
        let _ = writeln!(out, "  <p class=\"footer\">{}</p>", RECEIPT_FOOTER);
        let _ = writeln!(
            out,
            "  <div class=\"signature\"><em>Signature</em><br><span class=\"line\">{}</span></div>",
            SIGNATORY
        );
        out.push_str("</div>\n");
        out
    }

    /// Standalone printable HTML document
    pub fn render_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Print Receipt</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            PRINT_CSS,
            self.render_fragment()
        )
    }
}

fn non_blank(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Invoice;

    fn enriched(status: InvoiceStatus, paid_date: Option<NaiveDate>) -> EnrichedInvoice {
        EnrichedInvoice {
            invoice: Invoice {
                id: 42,
                tenant_id: 3,
                amount: 850.0,
                due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                status,
                paid_date,
            },
            tenant_name: "Sara <Haddad>".to_string(),
            property_name: String::new(),
        }
    }

    fn issued() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_only_paid_invoices() {
        let err =
            Receipt::for_invoice(&enriched(InvoiceStatus::Overdue, None), 1, issued()).unwrap_err();
        assert_eq!(
            err,
            ReceiptError::NotPaid {
                id: 42,
                status: InvoiceStatus::Overdue
            }
        );
    }

    #[test]
    fn test_paid_without_date_shows_placeholder() {
        let receipt =
            Receipt::for_invoice(&enriched(InvoiceStatus::Paid, None), 123456, issued()).unwrap();
        assert_eq!(receipt.paid_on_display(), NOT_AVAILABLE);
        assert_eq!(receipt.property_name, NOT_AVAILABLE);
        assert_eq!(receipt.file_name(), "receipt-42.html");
    }

    #[test]
    fn test_render_text() {
        let paid = NaiveDate::from_ymd_opt(2024, 3, 5);
        let text = Receipt::for_invoice(&enriched(InvoiceStatus::Paid, paid), 77, issued())
            .unwrap()
            .render_text();

        assert!(text.contains("Receipt No. 77"));
        assert!(text.contains("03/05/2024"));
        assert!(text.contains("$850.00"));
        assert!(text.contains(PAYMENT_METHOD_PLACEHOLDER));
        assert!(text.contains(SIGNATORY));
    }

    #[test]
    fn test_render_html_escapes_names() {
        let html = Receipt::for_invoice(&enriched(InvoiceStatus::Paid, None), 77, issued())
            .unwrap()
            .render_html();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("@media print"));
        assert!(html.contains("Sara &lt;Haddad&gt;"));
        assert!(html.contains(RECEIPT_FOOTER));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_random_number_range() {
        for _ in 0..100 {
            assert!(Receipt::random_number() < 1_000_000);
        }
    }
}
