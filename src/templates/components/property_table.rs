use crate::domain::metrics::format_percent;
use crate::domain::Property;
use crate::templates::components::{currency, query_href};
use maud::{html, Markup};

/// What varies between the list views that share this table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableOptions<'a> {
    pub caption: &'a str,
    /// Offer a "nearby" link per row.
    pub link_nearby: bool,
    /// Sort by cap rate, highest first, instead of input order.
    pub sort_by_cap_rate: bool,
}

/// The one table every property list renders through.
pub fn property_table(properties: &[Property], opts: TableOptions<'_>) -> Markup {
    let mut rows: Vec<&Property> = properties.iter().collect();
    if opts.sort_by_cap_rate {
        rows.sort_by(|a, b| {
            b.cap_rate
                .unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&a.cap_rate.unwrap_or(f64::NEG_INFINITY))
        });
    }

    html! {
        section class="card" {
            h3 { (opts.caption) " " span class="muted" { "(" (properties.len()) ")" } }

            @if rows.is_empty() {
                p class="muted" { "No properties to show." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Address" }
                            th class="num" { "Zestimate" }
                            th class="num" { "Rent / mo" }
                            th class="num" { "Cap rate" }
                            th class="num" { "Net cap rate" }
                            th class="num" { "Beds / baths" }
                            th class="num" { "Sqft" }
                            th class="num" { "$ / sqft" }
                            th class="num" { "Built" }
                            @if opts.link_nearby { th {} }
                        }
                    }
                    tbody {
                        @for p in rows {
                            tr {
                                td {
                                    div { (p.display_address()) }
                                    div class="muted" {
                                        (p.property_type.as_deref().unwrap_or("N/A")) " · ZPID " (p.zpid)
                                    }
                                }
                                td class="num" { (currency(p.valuation)) }
                                td class="num" { (currency(p.monthly_rent)) }
                                td class="num" { (rate(p.cap_rate)) }
                                td class="num" { (rate(p.net_cap_rate)) }
                                td class="num" { (count(p.bedrooms)) " / " (count(p.bathrooms)) }
                                td class="num" { (count(p.living_area)) }
                                td class="num" {
                                    @match p.price_per_sqft {
                                        Some(v) => (currency(v)),
                                        None => "N/A",
                                    }
                                }
                                td class="num" {
                                    @match p.year_built {
                                        Some(y) => (y),
                                        None => "N/A",
                                    }
                                }
                                @if opts.link_nearby {
                                    td { a href=(query_href("/nearby", "zpid", &p.zpid)) { "Nearby" } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn rate(value: Option<f64>) -> String {
    value.map(format_percent).unwrap_or_else(|| "N/A".to_string())
}

fn count(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.1}"),
        None => "N/A".to_string(),
    }
}
