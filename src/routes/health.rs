use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;

use crate::acquire::Origin;
use crate::site::Site;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub origin: Origin,
    pub sections: Vec<&'static str>,
    pub projects: usize,
    pub testimonials: usize,
    pub version: &'static str,
}

impl HealthReport {
    pub fn for_site(site: &Site) -> HealthReport {
        HealthReport {
            // Serving fallback content means every configured source failed.
            status: if site.origin == Origin::Fallback { "degraded" } else { "ok" },
            origin: site.origin,
            sections: site.document.sections(),
            projects: site.rendered.ready.filter_items.len(),
            testimonials: site.rendered.ready.testimonials.len(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[get("/health")]
pub fn health(site: &State<Site>) -> Json<HealthReport> {
    Json(HealthReport::for_site(site))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![health]
}
