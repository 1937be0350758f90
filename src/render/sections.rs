//! Per-section rewrite handlers. Each builder only registers handlers for
//! fields that are present, so absent fields leave the shell untouched.

use lol_html::element;
use lol_html::html_content::ContentType;

use super::date::DateStyle;
use super::fragments;
use super::meta;
use super::sanitize::safe_url;
use super::{Handler, Handlers};
use crate::content::{
    About, Blog, Contact, ContactInfo, NavItem, PersonalInfo, Portfolio, Resume, Timeline,
};

fn set_text<'a>(selector: &str, value: &'a str) -> Handler<'a> {
    element!(selector, move |el| {
        el.set_inner_content(value, ContentType::Text);
        Ok(())
    })
}

fn set_attr<'a>(selector: &str, attr: &'static str, value: &'a str) -> Handler<'a> {
    element!(selector, move |el| {
        el.set_attribute(attr, value)?;
        Ok(())
    })
}

/// Replace the container's children with `markup`.
fn replace_children<'a>(selector: &str, markup: String) -> Handler<'a> {
    element!(selector, move |el| {
        el.set_inner_content(&markup, ContentType::Html);
        Ok(())
    })
}

/// Set the text of the first match only.
fn first_text<'a>(selector: &str, value: &'a str) -> Handler<'a> {
    let mut done = false;
    element!(selector, move |el| {
        if !done {
            done = true;
            el.set_inner_content(value, ContentType::Text);
        }
        Ok(())
    })
}

/// Point the first matching link at `href` and label it.
fn first_link<'a>(selector: &str, href: String, label: &'a str) -> Handler<'a> {
    let mut done = false;
    element!(selector, move |el| {
        if !done {
            done = true;
            el.set_attribute("href", &href)?;
            el.set_inner_content(label, ContentType::Text);
        }
        Ok(())
    })
}

fn list<T>(items: &[T], f: impl Fn(&T) -> String) -> String {
    items.iter().map(f).collect()
}

pub fn personal_info(info: &PersonalInfo) -> Handlers<'_> {
    let mut h = meta::handlers(info);

    if let Some(name) = info.name.as_deref() {
        h.push(element!(".name", move |el| {
            el.set_inner_content(name, ContentType::Text);
            el.set_attribute("title", name)?;
            Ok(())
        }));
    }
    if let Some(title) = info.title.as_deref() {
        h.push(set_text(".info-content .title", title));
    }
    if let Some(avatar) = info.avatar.as_deref() {
        let alt = info.name.as_deref();
        h.push(element!(".avatar-box img", move |el| {
            el.set_attribute("src", safe_url(avatar))?;
            if let Some(alt) = alt {
                el.set_attribute("alt", alt)?;
            }
            Ok(())
        }));
    }

    h
}

pub fn contact_info(contact: &ContactInfo) -> Handlers<'_> {
    let mut h: Handlers<'_> = Vec::new();

    if let Some(email) = contact.email.as_deref() {
        h.push(first_link(
            r#".contacts-list a[href^="mailto:"]"#,
            format!("mailto:{}", email),
            email,
        ));
    }
    if let Some(phone) = contact.phone.as_deref() {
        let dial: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
        h.push(first_link(
            r#".contacts-list a[href^="tel:"]"#,
            format!("tel:{}", dial),
            phone,
        ));
    }
    if let Some(birthday) = contact.birthday.as_deref() {
        h.push(first_text(".contacts-list time", birthday));
    }
    if let Some(location) = contact.location.as_deref() {
        h.push(first_text(".contacts-list address", location));
    }
    if let Some(social) = &contact.social_links {
        let links = social.ordered();
        let mut index = 0;
        h.push(element!(".social-link", move |el| {
            if let Some(Some(href)) = links.get(index) {
                el.set_attribute("href", safe_url(href))?;
            }
            index += 1;
            Ok(())
        }));
    }

    h
}

pub fn about<'a>(about: &'a About, dates: &DateStyle) -> Handlers<'a> {
    let mut h: Handlers<'a> = Vec::new();

    if let Some(title) = about.title.as_deref() {
        h.push(set_text(".about .article-title", title));
    }
    if let Some(paragraphs) = &about.description {
        h.push(replace_children(
            ".about-text",
            list(paragraphs, |p| fragments::paragraph(p)),
        ));
    }
    if let Some(services) = &about.services {
        if let Some(title) = services.title.as_deref() {
            h.push(set_text(".service-title", title));
        }
        if let Some(items) = &services.items {
            h.push(replace_children(".service-list", list(items, fragments::service_item)));
        }
    }
    if let Some(testimonials) = &about.testimonials {
        if let Some(title) = testimonials.title.as_deref() {
            h.push(set_text(".testimonials-title", title));
        }
        if let Some(items) = &testimonials.items {
            h.push(replace_children(
                ".testimonials-list",
                items
                    .iter()
                    .enumerate()
                    .map(|(i, t)| fragments::testimonial_item(t, i, dates))
                    .collect(),
            ));
        }
    }
    if let Some(clients) = &about.clients {
        if let Some(title) = clients.title.as_deref() {
            h.push(set_text(".clients-title", title));
        }
        if let Some(logos) = &clients.logos {
            h.push(replace_children(
                ".clients-list",
                list(logos, |l| fragments::client_item(l)),
            ));
        }
    }

    h
}

fn timeline<'a>(h: &mut Handlers<'a>, kind: &str, timeline: &'a Timeline) {
    let scope = format!(r#"[data-timeline="{}"]"#, kind);
    if let Some(title) = timeline.title.as_deref() {
        h.push(set_text(&format!("{} .h3", scope), title));
    }
    if let Some(items) = &timeline.items {
        h.push(replace_children(
            &format!("{} .timeline-list", scope),
            list(items, fragments::timeline_item),
        ));
    }
}

pub fn resume(resume: &Resume) -> Handlers<'_> {
    let mut h: Handlers<'_> = Vec::new();

    if let Some(title) = resume.title.as_deref() {
        h.push(set_text(".resume .article-title", title));
    }
    if let Some(education) = &resume.education {
        timeline(&mut h, "education", education);
    }
    if let Some(experience) = &resume.experience {
        timeline(&mut h, "experience", experience);
    }
    if let Some(skills) = &resume.skills {
        if let Some(title) = skills.title.as_deref() {
            h.push(set_text(".skills-title", title));
        }
        if let Some(items) = &skills.items {
            h.push(replace_children(".skills-list", list(items, fragments::skill_item)));
        }
    }

    h
}

pub fn portfolio(portfolio: &Portfolio) -> Handlers<'_> {
    let mut h: Handlers<'_> = Vec::new();

    if let Some(title) = portfolio.title.as_deref() {
        h.push(set_text(".portfolio .article-title", title));
    }
    if let Some(categories) = &portfolio.categories {
        let buttons: String = categories
            .iter()
            .enumerate()
            .map(|(i, c)| fragments::filter_button(c, i == 0))
            .collect();
        h.push(replace_children(".filter-list", buttons));
        h.push(replace_children(
            ".select-list",
            list(categories, |c| fragments::select_item(c)),
        ));
    }
    if let Some(projects) = &portfolio.projects {
        h.push(replace_children(".project-list", list(projects, fragments::project_item)));
    }

    h
}

pub fn blog<'a>(blog: &'a Blog, dates: &DateStyle) -> Handlers<'a> {
    let mut h: Handlers<'a> = Vec::new();

    if let Some(title) = blog.title.as_deref() {
        h.push(set_text(".blog .article-title", title));
    }
    if let Some(posts) = &blog.posts {
        h.push(replace_children(
            ".blog-posts-list",
            list(posts, |p| fragments::blog_post_item(p, dates)),
        ));
    }

    h
}

pub fn contact(contact: &Contact) -> Handlers<'_> {
    let mut h: Handlers<'_> = Vec::new();

    if let Some(title) = contact.title.as_deref() {
        h.push(set_text(".contact .article-title", title));
    }
    if let Some(form_title) = contact.form_title.as_deref() {
        h.push(set_text(".form-title", form_title));
    }
    if let Some(map) = contact.map_embed.as_deref() {
        h.push(set_attr(".mapbox iframe", "src", safe_url(map)));
    }
    if let Some(fields) = &contact.form_fields {
        if let Some(p) = fields.fullname_placeholder.as_deref() {
            h.push(set_attr(r#"input[name="fullname"]"#, "placeholder", p));
        }
        if let Some(p) = fields.email_placeholder.as_deref() {
            h.push(set_attr(r#"input[name="email"]"#, "placeholder", p));
        }
        if let Some(p) = fields.message_placeholder.as_deref() {
            h.push(set_attr(r#"textarea[name="message"]"#, "placeholder", p));
        }
        if let Some(submit) = fields.submit_text.as_deref() {
            h.push(set_text(".form-btn span", submit));
        }
    }

    h
}

pub fn navigation(items: &[NavItem]) -> Handlers<'_> {
    vec![replace_children(".navbar-list", list(items, fragments::nav_item))]
}
