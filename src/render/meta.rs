use lol_html::element;
use lol_html::html_content::ContentType;

use super::sanitize::safe_url;
use super::Handlers;
use crate::content::PersonalInfo;

/// Document title for the page, built from the owner's name and title.
pub fn page_title(info: &PersonalInfo) -> Option<String> {
    match (info.name.as_deref(), info.title.as_deref()) {
        (Some(name), Some(title)) => Some(format!("{} - {} Portfolio", name, title)),
        (Some(name), None) => Some(format!("{} Portfolio", name)),
        (None, Some(title)) => Some(format!("{} Portfolio", title)),
        (None, None) => None,
    }
}

/// Rewrites for document-level metadata: `<title>`, description and
/// keywords meta tags, and the favicon link.
pub fn handlers(info: &PersonalInfo) -> Handlers<'_> {
    let mut h: Handlers<'_> = Vec::new();

    if let Some(title) = page_title(info) {
        h.push(element!("title", move |el| {
            el.set_inner_content(&title, ContentType::Text);
            Ok(())
        }));
    }
    if let Some(desc) = info.description.as_deref() {
        h.push(element!(r#"meta[name="description"]"#, move |el| {
            el.set_attribute("content", desc)?;
            Ok(())
        }));
    }
    if let Some(keywords) = info.keywords.as_deref() {
        h.push(element!(r#"meta[name="keywords"]"#, move |el| {
            el.set_attribute("content", keywords)?;
            Ok(())
        }));
    }
    if let Some(favicon) = info.favicon.as_deref() {
        h.push(element!(r#"link[rel="shortcut icon"]"#, move |el| {
            el.set_attribute("href", safe_url(favicon))?;
            Ok(())
        }));
    }

    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title_variants() {
        let mut info = PersonalInfo {
            name: Some("Arun".into()),
            title: Some("Data Scientist".into()),
            ..Default::default()
        };
        assert_eq!(page_title(&info).as_deref(), Some("Arun - Data Scientist Portfolio"));
        info.title = None;
        assert_eq!(page_title(&info).as_deref(), Some("Arun Portfolio"));
        info.name = None;
        assert_eq!(page_title(&info), None);
    }
}
