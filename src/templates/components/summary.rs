use crate::domain::metrics::format_percent;
use crate::domain::PortfolioSummary;
use crate::templates::components::currency;
use maud::{html, Markup};

pub fn summary_cards(summary: &PortfolioSummary) -> Markup {
    html! {
        div class="cards" {
            div class="card" { div class="muted" { "Total value" } strong { (currency(summary.total_value)) } }
            div class="card" { div class="muted" { "Monthly rent" } strong { (currency(summary.total_rental)) } }
            div class="card" { div class="muted" { "Avg cap rate" } strong { (format_percent(summary.avg_cap_rate)) } }
            div class="card" { div class="muted" { "Properties" } strong { (summary.property_count) } }
        }
        @if summary.total_sqft > 0.0 {
            p class="muted" {
                (currency(summary.avg_price_per_sqft)) " per sqft across " (summary.total_sqft) " sqft"
            }
        }
    }
}
