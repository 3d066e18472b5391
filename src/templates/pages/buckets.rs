// templates/pages/buckets.rs

use crate::domain::BucketStats;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn buckets_page(stats: &BucketStats) -> Markup {
    desktop_layout(
        "Buckets",
        html! {
            main class="container" {
                h1 { "Geo buckets" }
                p {
                    strong { (stats.total_buckets) } " buckets, "
                    strong { (stats.total_properties) } " listings, "
                    (format!("{:.2}", stats.avg_properties_per_bucket)) " per bucket on average."
                }

                table {
                    thead {
                        tr {
                            th { "Key" }
                            th { "Canonical name" }
                            th { "Aliases" }
                            th { "Listings" }
                        }
                    }
                    tbody {
                        @for b in &stats.buckets {
                            tr {
                                td { code { (b.bucket_key) } }
                                td { (b.canonical_name) }
                                td { (b.aliases.join(", ")) }
                                td { (b.property_count) }
                            }
                        }
                    }
                }
            }
        },
    )
}
