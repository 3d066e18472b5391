use maud::{html, Markup};

use crate::domain::Listing;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn search_form(value: &str) -> Markup {
    html! {
        form action="/search" method="get" {
            input type="text" name="location" value=(value) placeholder="e.g. Sangotedo, Ajah" required;
            button class="btn" type="submit" { "Search" }
        }
    }
}

pub fn listings_table(listings: &[Listing]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Title" }
                    th { "Location" }
                    th { "Price" }
                    th { "Beds" }
                    th { "Baths" }
                    th { "Listed" }
                }
            }
            tbody {
                @for l in listings {
                    tr {
                        td { (l.title) }
                        td { (l.location_name) }
                        td { (format!("{:.0}", l.price)) }
                        td { (l.bedrooms) }
                        td { (l.bathrooms) }
                        td { (l.created_at.format("%Y-%m-%d %H:%M").to_string()) }
                    }
                }
            }
        }
    }
}
