use lol_html::{comments, element, rewrite_str, RewriteStrSettings};
use log::warn;
use scraper::Html;

use super::html_escape;

/// Elements dropped together with their content
const DANGEROUS_ELEMENTS: &[&str] = &[
    "script",
    "style",
    "iframe",
    "frame",
    "frameset",
    "object",
    "embed",
    "applet",
    "base",
    "link",
    "meta",
    "form",
    "template",
    "svg",
    "math",
    "textarea",
    "select",
    "noscript",
];

/// Inline formatting that survives. Any other tag is unwrapped and only its
/// text is kept.
const ALLOWED_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "br", "cite", "code", "em", "i", "img", "mark", "q", "s", "small", "span",
    "strong", "sub", "sup", "u",
];

/// Attributes kept per element; everything else is stripped
const ALLOWED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title"]),
    ("abbr", &["title"]),
    ("img", &["src", "alt", "width", "height"]),
    ("q", &["cite"]),
];

/// Dangerous URI schemes in href/src attributes
const DANGEROUS_SCHEMES: &[&str] = &[
    "javascript:",
    "data:text/html",
    "data:application",
    "vbscript:",
];

/// Attributes that can contain URIs and need scheme checking
const URI_ATTRIBUTES: &[&str] = &["href", "src", "cite"];

/// Clean a controlled markup fragment (testimonial text) before it is
/// inserted as markup. Inline formatting survives; block structure is
/// unwrapped and anything that can run code is dropped. If the fragment
/// cannot be processed it is escaped whole.
///
/// The fragment is first re-serialized through an HTML parser. That closes
/// open tags, discards stray end tags and decodes character references, so
/// the fragment cannot break out of its container and the checks below see
/// the attribute values a browser would.
pub fn sanitize_fragment(input: &str) -> String {
    let balanced = Html::parse_fragment(input).root_element().inner_html();

    let result = rewrite_str(
        &balanced,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("*", |el| {
                    let tag = el.tag_name().to_lowercase();
                    if DANGEROUS_ELEMENTS.contains(&tag.as_str()) {
                        el.remove();
                        return Ok(());
                    }
                    if !ALLOWED_ELEMENTS.contains(&tag.as_str()) {
                        el.remove_and_keep_content();
                        return Ok(());
                    }

                    let attrs: Vec<(String, String)> = el
                        .attributes()
                        .iter()
                        .map(|a| (a.name(), a.value()))
                        .collect();
                    for (name, value) in attrs {
                        if !is_allowed_attribute(&tag, &name)
                            || (URI_ATTRIBUTES.contains(&name.as_str()) && has_dangerous_uri(&value))
                        {
                            el.remove_attribute(&name);
                        }
                    }
                    Ok(())
                }),
                // Comments can hide conditional markup
                comments!("*", |c| {
                    c.remove();
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    );

    match result {
        Ok(clean) => clean,
        Err(e) => {
            warn!("Markup fragment could not be sanitized, escaping it: {}", e);
            html_escape(input)
        }
    }
}

/// `url` if it is safe to place in an href/src, otherwise `#`.
pub fn safe_url(url: &str) -> &str {
    if has_dangerous_uri(url) {
        "#"
    } else {
        url
    }
}

fn is_allowed_attribute(tag: &str, name: &str) -> bool {
    let name = name.to_lowercase();
    ALLOWED_ATTRIBUTES
        .iter()
        .find(|(t, _)| *t == tag)
        .is_some_and(|(_, names)| names.contains(&name.as_str()))
}

fn has_dangerous_uri(value: &str) -> bool {
    // Browsers ignore embedded whitespace and control chars in schemes
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_lowercase();
    DANGEROUS_SCHEMES
        .iter()
        .any(|scheme| compact.starts_with(scheme))
}
