//! Writes a [`ViewState`] back into the rendered page.

use lol_html::html_content::{ContentType, Element};
use lol_html::{element, rewrite_str, HandlerResult, RewriteStrSettings};

use super::{ContentReady, NoticeKind, ViewState};
use crate::render::{html_escape, Handlers, RenderError};

const ACTIVE: &str = "active";

fn set_class(el: &mut Element<'_, '_>, class: &str, on: bool) -> HandlerResult {
    let current = el.get_attribute("class").unwrap_or_default();
    let mut tokens: Vec<&str> = current.split_whitespace().filter(|t| *t != class).collect();
    if on {
        tokens.push(class);
    }
    let updated = tokens.join(" ");
    if updated == current.split_whitespace().collect::<Vec<_>>().join(" ") {
        return Ok(());
    }
    if tokens.is_empty() {
        el.remove_attribute("class");
    } else {
        el.set_attribute("class", &updated)?;
    }
    Ok(())
}

fn page_handlers<'a>(state: &'a ViewState, ready: &'a ContentReady, h: &mut Handlers<'a>) {
    if let Some(page) = state.page.as_deref() {
        let mut index = 0;
        h.push(element!("[data-nav-link]", move |el| {
            let on = ready.nav_links.get(index).map(String::as_str) == Some(page);
            index += 1;
            set_class(el, ACTIVE, on)
        }));
        h.push(element!("[data-page]", move |el| {
            let on = el.get_attribute("data-page").as_deref() == Some(page);
            set_class(el, ACTIVE, on)
        }));
    }
}

fn portfolio_handlers<'a>(state: &'a ViewState, h: &mut Handlers<'a>) {
    if let Some(active) = state.active_filter_button {
        let mut index = 0;
        h.push(element!("[data-filter-btn]", move |el| {
            let on = index == active;
            index += 1;
            set_class(el, ACTIVE, on)
        }));
    }
    let filter = state.filter.as_str();
    h.push(element!("[data-filter-item]", move |el| {
        let category = el.get_attribute("data-category").unwrap_or_default();
        set_class(el, ACTIVE, filter == "all" || category == filter)
    }));
    h.push(element!("[data-select]", move |el| set_class(el, ACTIVE, state.select_open)));
    if let Some(label) = state.select_label.as_deref() {
        h.push(element!("[data-select-value]", move |el| {
            el.set_inner_content(label, ContentType::Text);
            Ok(())
        }));
    }
}

fn modal_handlers<'a>(state: &'a ViewState, h: &mut Handlers<'a>) {
    let open = state.modal_open;
    h.push(element!("[data-modal-container]", move |el| set_class(el, ACTIVE, open)));
    h.push(element!("[data-overlay]", move |el| set_class(el, ACTIVE, open)));

    if let Some(modal) = &state.modal {
        h.push(element!("[data-modal-img]", move |el| {
            el.set_attribute("src", &modal.img_src)?;
            el.set_attribute("alt", &modal.img_alt)?;
            Ok(())
        }));
        // Both were read back from the rendered page and are already safe markup.
        h.push(element!("[data-modal-title]", move |el| {
            el.set_inner_content(&modal.title_html, ContentType::Html);
            Ok(())
        }));
        h.push(element!("[data-modal-text]", move |el| {
            el.set_inner_content(&modal.text_html, ContentType::Html);
            Ok(())
        }));
    }
}

fn form_handlers<'a>(state: &'a ViewState, h: &mut Handlers<'a>) {
    h.push(element!("[data-form-btn]", move |el| {
        if state.submit_enabled {
            el.remove_attribute("disabled");
        } else if !el.has_attribute("disabled") {
            el.set_attribute("disabled", "")?;
        }
        Ok(())
    }));
    if !state.form_values.is_empty() {
        h.push(element!("[data-form] [data-form-input]", move |el| {
            let Some(value) = el.get_attribute("name").and_then(|n| state.form_values.get(&n)) else {
                return Ok(());
            };
            if el.tag_name() == "textarea" {
                el.set_inner_content(value, ContentType::Text);
            } else {
                el.set_attribute("value", value)?;
            }
            Ok(())
        }));
    }
    if let Some(notice) = &state.notice {
        let class = match notice.kind {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        };
        h.push(element!("[data-form-status]", move |el| {
            el.set_inner_content(&html_escape(&notice.message), ContentType::Html);
            set_class(el, class, true)
        }));
    }
}

/// Reflect `state` in `html`. Controls not covered by the state keep their
/// rendered defaults.
pub fn apply(html: &str, state: &ViewState, ready: &ContentReady) -> Result<String, RenderError> {
    let mut h: Handlers<'_> = Vec::new();
    page_handlers(state, ready, &mut h);
    portfolio_handlers(state, &mut h);
    modal_handlers(state, &mut h);
    h.push(element!("[data-sidebar]", move |el| set_class(el, ACTIVE, state.sidebar_open)));
    form_handlers(state, &mut h);

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: h,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|source| RenderError::Rewrite { section: "view", source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::{Interactions, Notice, Target};

    const PAGE: &str = r#"<aside class="sidebar" data-sidebar></aside>
<ul><li><button class="navbar-link active" data-nav-link>About</button></li><li><button class="navbar-link" data-nav-link>Portfolio</button></li></ul>
<article class="about active" data-page="about">
<div data-testimonials-item><img src="a.png" alt="Ann" data-testimonials-avatar><h4 data-testimonials-title>Ann</h4><div data-testimonials-text><p>Kind <em>words</em></p></div></div>
<div class="modal-container" data-modal-container><div class="overlay" data-overlay></div>
<img src="" alt="" data-modal-img><h4 data-modal-title></h4><div data-modal-text></div></div>
</article>
<article class="portfolio" data-page="portfolio">
<button class="active" data-filter-btn>All</button><button data-filter-btn>Web</button>
<button class="filter-select" data-select><div data-select-value>Select category</div></button>
<li class="project-item active" data-filter-item data-category="web"><h3 class="project-title">A</h3></li>
<li class="project-item active" data-filter-item data-category="ml"><h3 class="project-title">B</h3></li>
</article>
<p class="form-status" data-form-status></p>
<form data-form><input type="text" name="fullname" required data-form-input>
<textarea name="message" required data-form-input></textarea>
<button class="form-btn" disabled data-form-btn><span>Send</span></button></form>"#;

    fn ui() -> Interactions {
        let mut ui = Interactions::new();
        ui.on_content_ready(&ContentReady::scan(PAGE));
        ui
    }

    fn render(ui: &Interactions) -> String {
        apply(PAGE, ui.state(), ui.ready()).unwrap()
    }

    #[test]
    fn test_default_state_keeps_rendered_page() {
        let out = render(&ui());
        assert!(out.contains(r#"<article class="about active" data-page="about">"#));
        assert!(out.contains(r#"<button class="navbar-link active" data-nav-link>About"#));
        assert!(out.contains(r#"class="project-item active" data-filter-item data-category="ml""#));
        assert!(out.contains("disabled data-form-btn"));
    }

    #[test]
    fn test_page_switch() {
        let mut ui = ui();
        ui.click(Target::NavLink(1));
        let out = render(&ui);
        assert!(out.contains(r#"<article class="about" data-page="about">"#));
        assert!(out.contains(r#"<article class="portfolio active" data-page="portfolio">"#));
        assert!(out.contains(r#"<button class="navbar-link" data-nav-link>About"#));
        assert!(out.contains(r#"<button class="navbar-link active" data-nav-link>Portfolio"#));
    }

    #[test]
    fn test_filter_hides_other_categories() {
        let mut ui = ui();
        ui.click(Target::FilterButton(1));
        let out = render(&ui);
        assert!(out.contains(r#"<li class="project-item active" data-filter-item data-category="web">"#));
        assert!(out.contains(r#"<li class="project-item" data-filter-item data-category="ml">"#));
        assert!(out.contains(r#"<button data-filter-btn>All</button><button data-filter-btn class="active">Web</button>"#));
        assert!(out.contains("<div data-select-value>Web</div>"));
    }

    #[test]
    fn test_modal_is_filled_and_opened() {
        let mut ui = ui();
        ui.click(Target::Testimonial(0));
        let out = render(&ui);
        assert!(out.contains(r#"class="modal-container active" data-modal-container"#));
        assert!(out.contains(r#"class="overlay active" data-overlay"#));
        assert!(out.contains(r#"<img src="a.png" alt="Ann" data-modal-img>"#));
        assert!(out.contains("<div data-modal-text><p>Kind <em>words</em></p></div>"));
    }

    #[test]
    fn test_sidebar_open() {
        let mut ui = ui();
        ui.click(Target::SidebarButton);
        assert!(render(&ui).contains(r#"<aside class="sidebar active" data-sidebar>"#));
    }

    #[test]
    fn test_form_values_and_notice() {
        let mut ui = ui();
        ui.input("fullname", "Ann Lee");
        ui.input("message", "<b>hi</b> there friend");
        ui.notify(Notice::error("Check <fields>"));
        let out = render(&ui);
        assert!(out.contains(r#"value="Ann Lee""#));
        assert!(out.contains("&lt;b&gt;hi&lt;/b&gt; there friend</textarea>"));
        assert!(out.contains(r#"<p class="form-status error" data-form-status>Check &lt;fields&gt;</p>"#));
        assert!(!out.contains("disabled data-form-btn"));
    }
}
