//! Interaction layer for the rendered page.
//!
//! The renderer hands back a [`ContentReady`] describing the controls it
//! produced. [`Interactions::on_content_ready`] binds one handler per
//! control; events are then replayed as [`Target`] clicks and inputs that
//! drive a [`ViewState`], which [`view::apply`] writes back into the page.

use log::debug;
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, HashMap};

use crate::render::fragments::match_key;

pub mod form;
pub mod view;

pub use form::FormGate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterItem {
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Testimonial {
    pub avatar_src: String,
    pub avatar_alt: String,
    pub title_html: String,
    pub text_html: String,
}

/// Completion signal from the renderer: the interactive controls present
/// in the populated page, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentReady {
    pub nav_links: Vec<String>,
    pub pages: Vec<String>,
    pub filter_buttons: Vec<String>,
    pub select_items: Vec<String>,
    pub filter_items: Vec<FilterItem>,
    pub testimonials: Vec<Testimonial>,
    pub form: FormGate,
}

fn sel(css: &'static str) -> Selector {
    Selector::parse(css).expect("interaction selector")
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join("").trim().to_string()
}

impl ContentReady {
    pub fn scan(html: &str) -> ContentReady {
        let doc = Html::parse_document(html);

        let nav_links = doc.select(&sel("[data-nav-link]")).map(|el| match_key(&text_of(el))).collect();
        let pages = doc
            .select(&sel("[data-page]"))
            .filter_map(|el| el.value().attr("data-page"))
            .map(str::to_string)
            .collect();
        let filter_buttons = doc.select(&sel("[data-filter-btn]")).map(text_of).collect();
        let select_items = doc.select(&sel("[data-select-item]")).map(text_of).collect();

        let title = sel(".project-title");
        let filter_items = doc
            .select(&sel("[data-filter-item]"))
            .map(|el| FilterItem {
                title: el.select(&title).next().map(text_of).unwrap_or_default(),
                category: el.value().attr("data-category").unwrap_or("").to_string(),
            })
            .collect();

        let avatar = sel("[data-testimonials-avatar]");
        let heading = sel("[data-testimonials-title]");
        let body = sel("[data-testimonials-text]");
        let testimonials = doc
            .select(&sel("[data-testimonials-item]"))
            .map(|el| {
                let img = el.select(&avatar).next();
                Testimonial {
                    avatar_src: img.and_then(|i| i.value().attr("src")).unwrap_or("").to_string(),
                    avatar_alt: img.and_then(|i| i.value().attr("alt")).unwrap_or("").to_string(),
                    title_html: el.select(&heading).next().map(|h| h.inner_html()).unwrap_or_default(),
                    text_html: el.select(&body).next().map(|b| b.inner_html()).unwrap_or_default(),
                }
            })
            .collect();

        ContentReady {
            nav_links,
            pages,
            filter_buttons,
            select_items,
            filter_items,
            testimonials,
            form: FormGate::scan(&doc),
        }
    }
}

/// Something a visitor can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    NavLink(usize),
    FilterButton(usize),
    SelectBox,
    SelectItem(usize),
    Testimonial(usize),
    ModalClose,
    Overlay,
    SidebarButton,
    FormInput(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum Action {
    ShowPage(String),
    Filter { index: usize, label: String },
    PickFromSelect(String),
    ToggleSelect,
    OpenTestimonial(usize),
    ToggleModal,
    ToggleSidebar,
    RecheckForm,
}

/// One handler per target. Binding a target again replaces its handler.
#[derive(Debug, Default)]
pub struct Bindings {
    handlers: HashMap<Target, Action>,
}

impl Bindings {
    fn attach(&mut self, target: Target, action: Action) {
        self.handlers.insert(target, action);
    }

    fn get(&self, target: Target) -> Option<&Action> {
        self.handlers.get(&target)
    }

    fn len(&self) -> usize {
        self.handlers.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modal {
    pub img_src: String,
    pub img_alt: String,
    pub title_html: String,
    pub text_html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Notice {
        Notice { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Notice {
        Notice { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Visible state of the page. `None` fields leave the rendered defaults
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub page: Option<String>,
    pub filter: String,
    pub active_filter_button: Option<usize>,
    pub select_label: Option<String>,
    pub select_open: bool,
    pub modal: Option<Modal>,
    pub modal_open: bool,
    pub sidebar_open: bool,
    pub form_values: BTreeMap<String, String>,
    pub submit_enabled: bool,
    pub notice: Option<Notice>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            page: None,
            filter: "all".to_string(),
            active_filter_button: None,
            select_label: None,
            select_open: false,
            modal: None,
            modal_open: false,
            sidebar_open: false,
            form_values: BTreeMap::new(),
            submit_enabled: false,
            notice: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Interactions {
    ready: ContentReady,
    bindings: Bindings,
    state: ViewState,
}

impl Interactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind handlers for the controls in `ready`. Safe to call repeatedly:
    /// previous bindings are dropped before the new set is attached.
    pub fn on_content_ready(&mut self, ready: &ContentReady) {
        self.ready = ready.clone();
        self.bindings = Bindings::default();

        for (i, key) in self.ready.nav_links.iter().enumerate() {
            self.bindings.attach(Target::NavLink(i), Action::ShowPage(key.clone()));
        }
        for (i, label) in self.ready.filter_buttons.iter().enumerate() {
            self.bindings
                .attach(Target::FilterButton(i), Action::Filter { index: i, label: label.clone() });
        }
        if !self.ready.select_items.is_empty() {
            self.bindings.attach(Target::SelectBox, Action::ToggleSelect);
        }
        for (i, label) in self.ready.select_items.iter().enumerate() {
            self.bindings.attach(Target::SelectItem(i), Action::PickFromSelect(label.clone()));
        }
        for i in 0..self.ready.testimonials.len() {
            self.bindings.attach(Target::Testimonial(i), Action::OpenTestimonial(i));
        }
        if !self.ready.testimonials.is_empty() {
            self.bindings.attach(Target::ModalClose, Action::ToggleModal);
            self.bindings.attach(Target::Overlay, Action::ToggleModal);
        }
        self.bindings.attach(Target::SidebarButton, Action::ToggleSidebar);
        for i in 0..self.ready.form.fields.len() {
            self.bindings.attach(Target::FormInput(i), Action::RecheckForm);
        }

        self.state.submit_enabled = self.ready.form.allows_submit(&self.state.form_values);
        debug!("Bound {} interaction handlers", self.bindings.len());
    }

    /// Activate `target`. Returns how many handlers ran.
    pub fn click(&mut self, target: Target) -> usize {
        let Some(action) = self.bindings.get(target).cloned() else {
            return 0;
        };
        self.run(action);
        1
    }

    fn run(&mut self, action: Action) {
        let state = &mut self.state;
        match action {
            Action::ShowPage(key) => state.page = Some(key),
            Action::Filter { index, label } => {
                state.filter = match_key(&label);
                state.select_label = Some(label);
                state.active_filter_button = Some(index);
            }
            Action::PickFromSelect(label) => {
                state.filter = match_key(&label);
                state.select_label = Some(label);
                state.select_open = !state.select_open;
            }
            Action::ToggleSelect => state.select_open = !state.select_open,
            Action::OpenTestimonial(i) => {
                if let Some(t) = self.ready.testimonials.get(i) {
                    state.modal = Some(Modal {
                        img_src: t.avatar_src.clone(),
                        img_alt: t.avatar_alt.clone(),
                        title_html: t.title_html.clone(),
                        text_html: t.text_html.clone(),
                    });
                    state.modal_open = !state.modal_open;
                }
            }
            Action::ToggleModal => state.modal_open = !state.modal_open,
            Action::ToggleSidebar => state.sidebar_open = !state.sidebar_open,
            Action::RecheckForm => {
                state.submit_enabled = self.ready.form.allows_submit(&state.form_values);
            }
        }
    }

    /// Type `value` into the form field called `name`.
    pub fn input(&mut self, name: &str, value: &str) -> usize {
        let Some(index) = self.ready.form.fields.iter().position(|f| f.name == name) else {
            return 0;
        };
        self.state.form_values.insert(name.to_string(), value.to_string());
        self.click(Target::FormInput(index))
    }

    /// Show the page for `key` through its nav link, or directly when the
    /// page exists without one.
    pub fn navigate(&mut self, key: &str) -> bool {
        let key = match_key(key);
        if let Some(i) = self.ready.nav_links.iter().position(|k| *k == key) {
            return self.click(Target::NavLink(i)) > 0;
        }
        if self.ready.pages.contains(&key) {
            self.state.page = Some(key);
            return true;
        }
        false
    }

    /// Apply the category filter for `key`, preferring the button list and
    /// falling back to the select list.
    pub fn filter_by(&mut self, key: &str) -> bool {
        let key = match_key(key);
        if let Some(i) = self.ready.filter_buttons.iter().position(|b| match_key(b) == key) {
            return self.click(Target::FilterButton(i)) > 0;
        }
        if let Some(i) = self.ready.select_items.iter().position(|s| match_key(s) == key) {
            self.click(Target::SelectBox);
            return self.click(Target::SelectItem(i)) > 0;
        }
        false
    }

    pub fn notify(&mut self, notice: Notice) {
        self.state.notice = Some(notice);
    }

    pub fn clear_form(&mut self) {
        self.state.form_values.clear();
        self.state.submit_enabled = self.ready.form.allows_submit(&self.state.form_values);
    }

    /// Portfolio items shown under the current filter.
    pub fn visible_items(&self) -> Vec<&FilterItem> {
        let filter = &self.state.filter;
        self.ready
            .filter_items
            .iter()
            .filter(|item| filter == "all" || item.category == *filter)
            .collect()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn ready(&self) -> &ContentReady {
        &self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<aside data-sidebar><button data-sidebar-btn>More</button></aside>
<nav><ul>
  <li><button class="navbar-link active" data-nav-link>About</button></li>
  <li><button class="navbar-link" data-nav-link>Portfolio</button></li>
</ul></nav>
<article data-page="about">
  <ul>
    <li><div data-testimonials-item>
      <img src="a.png" alt="Ann" data-testimonials-avatar>
      <h4 data-testimonials-title>Ann</h4>
      <div data-testimonials-text><p>Great <em>work</em></p></div>
    </div></li>
  </ul>
</article>
<article data-page="portfolio">
  <ul>
    <li><button data-filter-btn>All</button></li>
    <li><button data-filter-btn>Web</button></li>
  </ul>
  <button data-select><div data-select-value>Select</div></button>
  <ul><li><button data-select-item>All</button></li><li><button data-select-item>Web</button></li></ul>
  <ul>
    <li data-filter-item data-category="web"><h3 class="project-title">A</h3></li>
    <li data-filter-item data-category="ml"><h3 class="project-title">B</h3></li>
    <li data-filter-item data-category="web"><h3 class="project-title">C</h3></li>
  </ul>
</article>
<article data-page="contact">
  <form data-form>
    <input type="text" name="fullname" required data-form-input>
    <input type="email" name="email" required data-form-input>
  </form>
</article>
</body></html>"#;

    fn bound() -> Interactions {
        let mut ui = Interactions::new();
        ui.on_content_ready(&ContentReady::scan(PAGE));
        ui
    }

    #[test]
    fn test_scan_finds_controls() {
        let ready = ContentReady::scan(PAGE);
        assert_eq!(ready.nav_links, vec!["about", "portfolio"]);
        assert_eq!(ready.pages, vec!["about", "portfolio", "contact"]);
        assert_eq!(ready.filter_buttons, vec!["All", "Web"]);
        assert_eq!(ready.filter_items.len(), 3);
        assert_eq!(ready.testimonials[0].avatar_src, "a.png");
        assert!(ready.testimonials[0].text_html.contains("<em>work</em>"));
        assert_eq!(ready.form.fields.len(), 2);
    }

    #[test]
    fn test_nav_click_shows_page() {
        let mut ui = bound();
        assert_eq!(ui.click(Target::NavLink(1)), 1);
        assert_eq!(ui.state().page.as_deref(), Some("portfolio"));
    }

    #[test]
    fn test_filter_keeps_document_order() {
        let mut ui = bound();
        ui.click(Target::FilterButton(1));
        let titles: Vec<_> = ui.visible_items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(ui.state().active_filter_button, Some(1));
        assert_eq!(ui.state().select_label.as_deref(), Some("Web"));

        ui.click(Target::FilterButton(0));
        assert_eq!(ui.visible_items().len(), 3);
    }

    #[test]
    fn test_select_toggles() {
        let mut ui = bound();
        ui.click(Target::SelectBox);
        assert!(ui.state().select_open);
        ui.click(Target::SelectItem(1));
        assert!(!ui.state().select_open);
        assert_eq!(ui.state().filter, "web");
    }

    #[test]
    fn test_rebinding_does_not_duplicate_handlers() {
        let ready = ContentReady::scan(PAGE);
        let mut ui = Interactions::new();
        ui.on_content_ready(&ready);
        let count = ui.bindings.len();
        ui.on_content_ready(&ready);
        assert_eq!(ui.bindings.len(), count);

        assert_eq!(ui.click(Target::Testimonial(0)), 1);
        assert!(ui.state().modal_open);
        let modal = ui.state().modal.as_ref().unwrap();
        assert_eq!(modal.img_alt, "Ann");
        assert_eq!(modal.title_html, "Ann");
    }

    #[test]
    fn test_overlay_and_close_toggle_modal() {
        let mut ui = bound();
        ui.click(Target::Testimonial(0));
        ui.click(Target::Overlay);
        assert!(!ui.state().modal_open);
        ui.click(Target::Testimonial(0));
        ui.click(Target::ModalClose);
        assert!(!ui.state().modal_open);
    }

    #[test]
    fn test_unbound_target_fires_nothing() {
        let mut ui = Interactions::new();
        assert_eq!(ui.click(Target::NavLink(0)), 0);
        let mut ui = bound();
        assert_eq!(ui.click(Target::Testimonial(9)), 0);
    }

    #[test]
    fn test_form_gate_follows_input() {
        let mut ui = bound();
        assert!(!ui.state().submit_enabled);
        ui.input("fullname", "Ann");
        assert!(!ui.state().submit_enabled);
        ui.input("email", "ann@example.com");
        assert!(ui.state().submit_enabled);
        ui.input("email", "nope");
        assert!(!ui.state().submit_enabled);
        assert_eq!(ui.input("unknown", "x"), 0);
    }

    #[test]
    fn test_navigate_and_filter_by_key() {
        let mut ui = bound();
        assert!(ui.navigate("Contact"));
        assert_eq!(ui.state().page.as_deref(), Some("contact"));
        assert!(!ui.navigate("missing"));
        assert!(ui.filter_by("WEB"));
        assert_eq!(ui.visible_items().len(), 2);
        assert!(!ui.filter_by("nothing"));
    }

    #[test]
    fn test_sidebar_toggle() {
        let mut ui = bound();
        ui.click(Target::SidebarButton);
        assert!(ui.state().sidebar_open);
        ui.click(Target::SidebarButton);
        assert!(!ui.state().sidebar_open);
    }
}
