use super::{About, Blog, Contact, ContentDocument, PersonalInfo, Portfolio, Resume};

/// Minimal document used when no other source produced one. Covers just
/// enough for a page that does not look broken.
pub fn document() -> ContentDocument {
    let titled = |t: &str| Some(t.to_string());

    ContentDocument {
        personal_info: Some(PersonalInfo {
            name: titled("Arun Naudiyal"),
            title: titled("Senior Data Scientist"),
            avatar: titled("./assets/images/my-avatar.png"),
            ..Default::default()
        }),
        about: Some(About {
            title: titled("About me"),
            description: Some(vec![
                "I'm a Senior Data Scientist at SFL Scientific, working in the Innovation & Technology Operations division.".to_string(),
                "My expertise spans across Generative AI, advanced Data Science methodologies, and Multi Agent Architectures.".to_string(),
            ]),
            ..Default::default()
        }),
        resume: Some(Resume {
            title: titled("Resume"),
            ..Default::default()
        }),
        portfolio: Some(Portfolio {
            title: titled("Portfolio"),
            ..Default::default()
        }),
        blog: Some(Blog {
            title: titled("Blog"),
            ..Default::default()
        }),
        contact: Some(Contact {
            title: titled("Contact"),
            ..Default::default()
        }),
        ..Default::default()
    }
}
