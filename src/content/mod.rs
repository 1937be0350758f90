use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod fallback;

/// Root content record driving page population.
/// Every field is optional; the renderer skips whatever is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDocument {
    pub personal_info: Option<PersonalInfo>,
    pub contact_info: Option<ContactInfo>,
    pub about: Option<About>,
    pub resume: Option<Resume>,
    pub portfolio: Option<Portfolio>,
    pub blog: Option<Blog>,
    pub contact: Option<Contact>,
    pub navigation: Option<Vec<NavItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub avatar: Option<String>,
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub location: Option<String>,
    pub social_links: Option<SocialLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

impl SocialLinks {
    /// Links in the order the shell lays out its `.social-link` anchors.
    pub fn ordered(&self) -> [Option<&str>; 3] {
        [
            self.facebook.as_deref(),
            self.twitter.as_deref(),
            self.instagram.as_deref(),
        ]
    }
}

// ── About ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub title: Option<String>,
    pub description: Option<Vec<String>>,
    pub services: Option<Services>,
    pub testimonials: Option<Testimonials>,
    pub clients: Option<Clients>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    pub title: Option<String>,
    pub items: Option<Vec<ServiceItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonials {
    pub title: Option<String>,
    pub items: Option<Vec<TestimonialItem>>,
}

/// `text` is a controlled markup fragment; everything else is plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialItem {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub text: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clients {
    pub title: Option<String>,
    pub logos: Option<Vec<String>>,
}

// ── Resume ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub title: Option<String>,
    pub education: Option<Timeline>,
    pub experience: Option<Timeline>,
    pub skills: Option<Skills>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub items: Option<Vec<TimelineItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineItem {
    pub title: Option<String>,
    pub period: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub title: Option<String>,
    pub items: Option<Vec<SkillItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillItem {
    pub name: Option<String>,
    pub percentage: Option<f64>,
}

// ── Portfolio / Blog / Contact ──────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub title: Option<String>,
    pub categories: Option<Vec<String>>,
    pub projects: Option<Vec<ProjectItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub title: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blog {
    pub title: Option<String>,
    pub posts: Option<Vec<BlogPostItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPostItem {
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub title: Option<String>,
    pub form_title: Option<String>,
    pub map_embed: Option<String>,
    pub form_fields: Option<FormFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub fullname_placeholder: Option<String>,
    pub email_placeholder: Option<String>,
    pub message_placeholder: Option<String>,
    pub submit_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItem {
    pub name: Option<String>,
    pub active: bool,
}

// ── Validation ──────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("document has no sections")]
    Empty,
    #[error("invalid content at {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ContentDocument {
    /// Names of the top-level sections present in this document.
    pub fn sections(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.personal_info.is_some() {
            out.push("personal_info");
        }
        if self.contact_info.is_some() {
            out.push("contact_info");
        }
        if self.about.is_some() {
            out.push("about");
        }
        if self.resume.is_some() {
            out.push("resume");
        }
        if self.portfolio.is_some() {
            out.push("portfolio");
        }
        if self.blog.is_some() {
            out.push("blog");
        }
        if self.contact.is_some() {
            out.push("contact");
        }
        if self.navigation.is_some() {
            out.push("navigation");
        }
        out
    }

    /// Checks run once when a document is acquired. Field absence is fine;
    /// an entirely empty document or out-of-range values are not.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.sections().is_empty() {
            return Err(ContentError::Empty);
        }

        let skills = self
            .resume
            .as_ref()
            .and_then(|r| r.skills.as_ref())
            .and_then(|s| s.items.as_ref());
        for (i, skill) in skills.into_iter().flatten().enumerate() {
            if let Some(p) = skill.percentage {
                if !(0.0..=100.0).contains(&p) {
                    return Err(ContentError::Invalid {
                        field: format!("resume.skills.items[{}].percentage", i),
                        reason: format!("{} is outside 0..=100", p),
                    });
                }
            }
        }

        Ok(())
    }
}
