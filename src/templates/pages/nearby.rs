use crate::domain::Property;
use crate::templates::components::{property_table, query_href, TableOptions};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn nearby_page(origin_zpid: &str, properties: &[Property]) -> Markup {
    desktop_layout(
        "Nearby",
        html! {
            h1 { "Near ZPID " (origin_zpid) }
            p {
                a href=(query_href("/api/caprates/export", "zpid", origin_zpid)) { "Download as spreadsheet" }
            }
            (property_table(properties, TableOptions {
                caption: "Nearby properties",
                link_nearby: true,
                sort_by_cap_rate: true,
            }))
        },
    )
}
