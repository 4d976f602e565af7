// templates/pages/home.rs

use crate::store::SavedPortfolio;
use crate::templates::components::query_href;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page(saved: &[SavedPortfolio]) -> Markup {
    desktop_layout(
        "Home",
        html! {
            h1 { "Portfolio cap rates" }

            (card("Analyze properties", html! {
                form action="/dashboard" method="get" {
                    label for="input" {
                        "ZPIDs and/or street addresses, separated by commas or new lines"
                    }
                    textarea name="input" id="input" rows="6" cols="80"
                        placeholder="44158191, 123 Main St Springfield IL" {}
                    div { button type="submit" { "Analyze" } }
                }
            }))

            (card("Nearby cap rates", html! {
                form action="/nearby" method="get" {
                    input type="text" name="zpid" placeholder="ZPID" required;
                    button type="submit" { "Search" }
                }
            }))

            (card("Saved portfolios", html! {
                @if saved.is_empty() {
                    p class="muted" { "Nothing saved yet." }
                } @else {
                    ul {
                        @for p in saved {
                            li {
                                a href=(query_href("/dashboard", "input", &p.zpids.join(","))) { (p.name) }
                                " "
                                span class="muted" {
                                    (p.zpids.len()) " properties, saved "
                                    (p.saved_at.format("%Y-%m-%d %H:%M").to_string())
                                }
                            }
                        }
                    }
                }
            }))
        },
    )
}
