//! The populated site held in Rocket managed state.

use log::{error, info};
use rocket::tokio;
use std::net::IpAddr;
use std::path::Path;

use crate::acquire::{embedded, Acquired, Acquirer, Origin};
use crate::content::ContentDocument;
use crate::interact::{view, Interactions, ViewState};
use crate::rate_limit::RateLimiter;
use crate::render::{render_page, RenderOptions, Rendered};
use crate::settings::Settings;

pub struct Site {
    pub origin: Origin,
    pub document: ContentDocument,
    pub rendered: Rendered,
    pub limiter: RateLimiter,
    /// Peers allowed to name the client in forwarding headers.
    pub trusted_proxies: Vec<IpAddr>,
}

impl Site {
    /// Render `shell` with an already acquired document.
    pub fn from_parts(shell: &str, acquired: Acquired, settings: &Settings) -> Site {
        let rendered = render_page(shell, &acquired.document, &RenderOptions::from_settings(settings));
        info!(
            "Rendered page from {} content: {} sections, {} projects, {} testimonials",
            acquired.origin,
            acquired.document.sections().len(),
            rendered.ready.filter_items.len(),
            rendered.ready.testimonials.len(),
        );
        Site {
            origin: acquired.origin,
            document: acquired.document,
            rendered,
            limiter: RateLimiter::new(settings.contact.rate_limit, settings.rate_window()),
            trusted_proxies: settings.contact.trusted_proxies.clone(),
        }
    }

    /// Read the shell, acquire content and render the page.
    pub async fn boot(settings: &Settings) -> Result<Site, String> {
        let shell_path = settings.shell_path();
        let shell = read_shell(&shell_path).await?;

        if settings.content.embedded {
            match embedded::bundled() {
                Ok(doc) => {
                    embedded::install(doc);
                }
                Err(e) => error!("Bundled content is invalid JSON: {}", e),
            }
        }

        let acquired = Acquirer::standard(settings).acquire().await;
        Ok(Site::from_parts(&shell, acquired, settings))
    }

    /// Fresh interaction state bound to the rendered controls.
    pub fn interactions(&self) -> Interactions {
        let mut ui = Interactions::new();
        ui.on_content_ready(&self.rendered.ready);
        ui
    }

    /// The rendered page with `state` applied. Falls back to the plain
    /// rendered page if the view pass fails.
    pub fn page(&self, state: &ViewState) -> String {
        view::apply(&self.rendered.html, state, &self.rendered.ready).unwrap_or_else(|e| {
            error!("{}", e);
            self.rendered.html.clone()
        })
    }
}

async fn read_shell(path: &Path) -> Result<String, String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read shell {}: {}", path.display(), e))
}
