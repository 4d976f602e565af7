use crate::domain::ClassifiedInput;
use maud::{html, Markup};

/// Lists addresses that resolved to nothing and tokens that were ignored.
pub fn classification_report(input: &ClassifiedInput) -> Markup {
    let unresolved: Vec<&str> = input
        .address_results
        .iter()
        .filter(|r| !r.found)
        .map(|r| r.address.as_str())
        .collect();

    html! {
        @if !unresolved.is_empty() || !input.invalid_entries.is_empty() {
            section class="card warn" id="classification" {
                @if !unresolved.is_empty() {
                    p { "Addresses not found:" }
                    ul { @for a in &unresolved { li { (a) } } }
                }
                @if !input.invalid_entries.is_empty() {
                    p { "Ignored entries:" }
                    ul { @for e in &input.invalid_entries { li { (e) } } }
                }
            }
        }
    }
}
