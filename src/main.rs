#[macro_use]
extern crate rocket;

use rocket::fs::{FileServer, Options};
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};
use std::path::Path;

mod acquire;
mod boot;
mod content;
mod interact;
mod rate_limit;
mod render;
mod routes;
mod settings;
mod site;


use settings::{Settings, SETTINGS_FILE};
use site::Site;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the server around an already rendered site.
pub fn build(site: Site, assets: &Path) -> Rocket<Build> {
    rocket::build()
        .manage(site)
        .mount("/assets", FileServer::new(assets, Options::Missing | Options::Index))
        .mount("/", routes::public::routes())
        .mount("/", routes::health::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
async fn rocket() -> _ {
    env_logger::init();

    let settings = Settings::load(SETTINGS_FILE);

    // Boot check: site layout, shell and config files
    boot::run(&settings);

    let site = Site::boot(&settings).await.expect("Failed to build site");

    eprintln!("Serving {} content from {}", site.origin, settings.site.root.display());

    build(site, &settings.assets_dir())
}
