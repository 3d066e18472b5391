// templates/pages/home.rs

use crate::templates::{card, components::search_form, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        html! {
            h1 { "Find properties by area" }

            (search_form(""))

            (card("How it works", html! {
                p {
                    "Listings are grouped into ~500m grid cells. Every spelling of an area "
                    "that has been used for a listing in a cell is remembered, so "
                    "\"Sangotedo\", \"Sangotedo, Ajah\" and \"sangotedo lagos\" all find the same homes."
                }
            }))
        },
    )
}
