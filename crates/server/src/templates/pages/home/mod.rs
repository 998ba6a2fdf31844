use maud::{html, Markup};

use crate::templates::layouts::{base, PageConfig};

/// `(path, description)` of every route the API serves
pub const ROUTES: [(&str, &str); 5] = [
    ("/api/v1.0/precipitation", "Precipitation for every recorded date"),
    ("/api/v1.0/stations", "Weather stations in the dataset"),
    (
        "/api/v1.0/tobs",
        "Temperature observations for the last year of data",
    ),
    (
        "/api/v1.0/<start>",
        "MIN/AVG/MAX temperature from start (YYYY-MM-DD) to the latest date",
    ),
    (
        "/api/v1.0/<start>/<end>",
        "MIN/AVG/MAX temperature from start to end, inclusive",
    ),
];

pub fn home_page(api_base: &str) -> Markup {
    let config = PageConfig {
        title: "Climate API",
    };

    base(&config, content(api_base))
}

fn content(api_base: &str) -> Markup {
    html! {
        div class="content" {
            h2 class="subtitle" { "Available Routes:" }
            table class="table is-striped is-fullwidth" {
                tbody {
                    @for (path, description) in ROUTES {
                        tr {
                            td {
                                // Parameterised routes are listed, not linked
                                @if path.contains('<') {
                                    code { (path) }
                                } @else {
                                    a href=(format!("{}{}", api_base, path)) { code { (path) } }
                                }
                            }
                            td { (description) }
                        }
                    }
                }
            }
        }
    }
}
