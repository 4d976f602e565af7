use crate::analysis::PortfolioAnalysis;
use crate::domain::ClassifiedInput;
use crate::templates::components::{
    classification_report, property_table, summary_cards, TableOptions,
};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn dashboard_page(
    input: &str,
    classified: &ClassifiedInput,
    analysis: &PortfolioAnalysis,
) -> Markup {
    desktop_layout(
        "Dashboard",
        html! {
            h1 { "Portfolio dashboard" }
            p class="muted" {
                (classified.total_properties_found) " properties found from your input"
            }

            (summary_cards(&analysis.summary))
            (classification_report(classified))
            (property_table(&analysis.properties, TableOptions {
                caption: "Properties",
                link_nearby: true,
                sort_by_cap_rate: false,
            }))

            form action="/dashboard" method="get" {
                textarea name="input" rows="3" cols="80" { (input) }
                div { button type="submit" { "Re-run" } }
            }
        },
    )
}
