use log::{debug, info, warn};
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;

use super::ClientIp;
use crate::interact::{Interactions, Notice, Target};
use crate::site::Site;

// ── Page ───────────────────────────────────────────────

/// Replays the visitor's last interaction from the query string: `page`
/// selects the article, `filter` the portfolio category, `testimonial`
/// opens that testimonial in the modal and `sidebar=open` expands the
/// contact sidebar.
#[get("/?<page>&<filter>&<testimonial>&<sidebar>")]
pub fn index(
    site: &State<Site>,
    page: Option<String>,
    filter: Option<String>,
    testimonial: Option<usize>,
    sidebar: Option<String>,
) -> RawHtml<String> {
    let mut ui = site.interactions();

    if let Some(page) = page.as_deref() {
        if !ui.navigate(page) {
            debug!("Unknown page {:?}, keeping default", page);
        }
    }
    if let Some(filter) = filter.as_deref() {
        if !ui.filter_by(filter) {
            debug!("Unknown filter {:?}, showing all", filter);
        }
    }
    if let Some(i) = testimonial {
        ui.click(Target::Testimonial(i));
    }
    if sidebar.as_deref() == Some("open") {
        ui.click(Target::SidebarButton);
    }

    RawHtml(site.page(ui.state()))
}

// ── Contact form ───────────────────────────────────────

#[derive(FromForm)]
pub struct ContactForm {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    fn fill(&self, ui: &mut Interactions) {
        let fields = [
            ("fullname", &self.fullname),
            ("email", &self.email),
            ("message", &self.message),
        ];
        for (name, value) in fields {
            ui.input(name, value.as_deref().unwrap_or(""));
        }
    }
}

#[post("/contact", data = "<form>")]
pub fn contact_submit(
    site: &State<Site>,
    form: Form<ContactForm>,
    client_ip: ClientIp,
) -> (Status, RawHtml<String>) {
    let mut ui = site.interactions();
    ui.navigate("contact");
    form.fill(&mut ui);

    let rate_key = format!("contact:{}", client_ip.0);
    if !site.limiter.check_and_record(&rate_key) {
        warn!("Contact form rate limit hit for {}", client_ip.0);
        ui.notify(Notice::error("Too many messages. Please wait before sending another."));
        return (Status::TooManyRequests, RawHtml(site.page(ui.state())));
    }

    if !ui.state().submit_enabled {
        let invalid = ui.ready().form.invalid_fields(&ui.state().form_values).join(", ");
        debug!("Contact form rejected, invalid fields: {}", invalid);
        ui.notify(Notice::error(format!("Please check these fields: {}", invalid)));
        return (Status::UnprocessableEntity, RawHtml(site.page(ui.state())));
    }

    info!(
        "Contact message from {} <{}> ({} chars)",
        form.fullname.as_deref().unwrap_or("").trim(),
        form.email.as_deref().unwrap_or("").trim(),
        form.message.as_deref().unwrap_or("").chars().count(),
    );
    ui.clear_form();
    ui.notify(Notice::success("Thanks, your message has been sent."));
    (Status::Ok, RawHtml(site.page(ui.state())))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![index, contact_submit]
}
