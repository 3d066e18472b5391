// templates/pages/search.rs

use crate::geo::SearchOutcome;
use crate::templates::{card, components::search_form, desktop_layout, listings_table};
use maud::{html, Markup};

pub fn search_page(query: &str, outcome: &SearchOutcome) -> Markup {
    desktop_layout(
        "Search",
        html! {
            main class="container" {
                (search_form(query))

                @match &outcome.primary_bucket {
                    Some(bucket) => {
                        p {
                            "Best match: " strong { (bucket.canonical_name) }
                            " (" code { (bucket.bucket_key) } ")"
                        }
                    }
                    None => p { "No area matched " strong { (query) } "." },
                }

                @if !outcome.listings.is_empty() {
                    (card(&format!("{} listing(s)", outcome.listings.len()), listings_table(&outcome.listings)))
                }
            }
        },
    )
}
