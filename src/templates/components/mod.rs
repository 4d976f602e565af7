use maud::{html, Markup};
use url::form_urlencoded;

pub mod classification;
pub mod error;
pub mod property_table;
pub mod summary;

pub use classification::classification_report;
pub use error::html_error_response;
pub use property_table::{property_table, TableOptions};
pub use summary::summary_cards;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// `path?key=value` with the value form-encoded.
pub fn query_href(path: &str, key: &str, value: &str) -> String {
    let value: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    format!("{path}?{key}={value}")
}

/// `$1,234,567` with the cents dropped.
pub fn currency(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
