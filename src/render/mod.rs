//! Populates the HTML shell from a [`ContentDocument`].
//!
//! Each top-level section is applied in its own rewrite pass. A pass that
//! fails leaves the page as it was before that pass, so one bad section can
//! never block the others.

use log::{debug, warn};
use lol_html::errors::RewritingError;
use lol_html::{rewrite_str, ElementContentHandlers, RewriteStrSettings, Selector};
use std::borrow::Cow;
use thiserror::Error;

use crate::content::ContentDocument;
use crate::interact::ContentReady;
use crate::settings::Settings;

pub mod date;
pub mod fragments;
pub mod meta;
pub mod sanitize;
pub mod sections;

pub use date::DateStyle;

pub(crate) type Handler<'h> = (Cow<'static, Selector>, ElementContentHandlers<'h>);
pub(crate) type Handlers<'h> = Vec<Handler<'h>>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rewriting {section} failed: {source}")]
    Rewrite {
        section: &'static str,
        #[source]
        source: RewritingError,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub dates: DateStyle,
}

impl RenderOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        RenderOptions {
            dates: DateStyle::from_settings(&settings.render),
        }
    }
}

/// The populated page plus the completion signal for the interaction layer.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub html: String,
    pub ready: ContentReady,
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn rewrite(html: &str, section: &'static str, handlers: Handlers<'_>) -> Result<String, RenderError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|source| RenderError::Rewrite { section, source })
}

/// Apply every present section of `doc` to `shell`, in document order.
/// Never fails: section errors are logged and that section is skipped.
pub fn render_page(shell: &str, doc: &ContentDocument, opts: &RenderOptions) -> Rendered {
    let dates = &opts.dates;
    let passes: Vec<(&'static str, Option<Handlers<'_>>)> = vec![
        ("personal_info", doc.personal_info.as_ref().map(sections::personal_info)),
        ("contact_info", doc.contact_info.as_ref().map(sections::contact_info)),
        ("about", doc.about.as_ref().map(|a| sections::about(a, dates))),
        ("resume", doc.resume.as_ref().map(sections::resume)),
        ("portfolio", doc.portfolio.as_ref().map(sections::portfolio)),
        ("blog", doc.blog.as_ref().map(|b| sections::blog(b, dates))),
        ("contact", doc.contact.as_ref().map(sections::contact)),
        ("navigation", doc.navigation.as_deref().map(sections::navigation)),
    ];

    let mut html = shell.to_string();
    for (section, handlers) in passes {
        let Some(handlers) = handlers else {
            debug!("Section {} absent, skipped", section);
            continue;
        };
        if handlers.is_empty() {
            continue;
        }
        match rewrite(&html, section, handlers) {
            Ok(out) => html = out,
            Err(e) => warn!("{}", e),
        }
    }

    let ready = ContentReady::scan(&html);
    Rendered { html, ready }
}
