//! Item → markup fragments. Each function depends only on the item it is
//! given; free text is escaped, URLs pass through `safe_url`.

use super::date::{time_element, DateStyle};
use super::html_escape;
use super::sanitize::{safe_url, sanitize_fragment};
use crate::content::{
    BlogPostItem, NavItem, ProjectItem, ServiceItem, SkillItem, TestimonialItem, TimelineItem,
};

fn text(v: &Option<String>) -> String {
    html_escape(v.as_deref().unwrap_or(""))
}

fn url(v: &Option<String>) -> String {
    html_escape(safe_url(v.as_deref().unwrap_or("#")))
}

/// Lowercased, trimmed label used for matching pages and categories.
pub fn match_key(label: &str) -> String {
    label.trim().to_lowercase()
}

pub fn paragraph(p: &str) -> String {
    format!("<p>{}</p>", html_escape(p))
}

pub fn service_item(service: &ServiceItem) -> String {
    let icon = match &service.icon {
        Some(icon) => format!(
            "<div class=\"service-icon-box\"><img src=\"{}\" alt=\"{} icon\" width=\"40\"></div>",
            html_escape(safe_url(icon)),
            html_escape(&service.title.as_deref().unwrap_or("").to_lowercase()),
        ),
        None => String::new(),
    };
    format!(
        "<li class=\"service-item\">{}<div class=\"service-content-box\">\
         <h4 class=\"h4 service-item-title\">{}</h4>\
         <p class=\"service-item-text\">{}</p>\
         </div></li>",
        icon,
        text(&service.title),
        text(&service.description),
    )
}

/// The testimonial text is markup by contract; it is sanitized, not escaped.
/// `index` addresses the testimonial for the modal link.
pub fn testimonial_item(t: &TestimonialItem, index: usize, dates: &DateStyle) -> String {
    let date = match &t.date {
        Some(raw) => time_element(raw, dates),
        None => String::new(),
    };
    format!(
        "<li class=\"testimonials-item\"><div class=\"content-card\" data-testimonials-item>\
         <figure class=\"testimonials-avatar-box\">\
         <img src=\"{}\" alt=\"{}\" width=\"60\" data-testimonials-avatar>\
         </figure>\
         <h4 class=\"h4 testimonials-item-title\" data-testimonials-title>{}</h4>\
         <div class=\"testimonials-text\" data-testimonials-text><p>{}</p></div>\
         {}<a class=\"testimonials-more\" href=\"/?page=about&amp;testimonial={}\">Read more</a>\
         </div></li>",
        url(&t.avatar),
        text(&t.name),
        text(&t.name),
        sanitize_fragment(t.text.as_deref().unwrap_or("")),
        date,
        index,
    )
}

pub fn client_item(logo: &str) -> String {
    format!(
        "<li class=\"clients-item\"><a href=\"#\"><img src=\"{}\" alt=\"client logo\"></a></li>",
        html_escape(safe_url(logo))
    )
}

pub fn timeline_item(item: &TimelineItem) -> String {
    format!(
        "<li class=\"timeline-item\">\
         <h4 class=\"h4 timeline-item-title\">{}</h4>\
         <span>{}</span>\
         <p class=\"timeline-text\">{}</p>\
         </li>",
        text(&item.title),
        text(&item.period),
        text(&item.description),
    )
}

pub fn skill_item(skill: &SkillItem) -> String {
    let pct = skill.percentage.unwrap_or(0.0).clamp(0.0, 100.0);
    format!(
        "<li class=\"skills-item\"><div class=\"title-wrapper\">\
         <h5 class=\"h5\">{name}</h5><data value=\"{pct}\">{pct}%</data>\
         </div><div class=\"skill-progress-bg\">\
         <div class=\"skill-progress-fill\" style=\"width: {pct}%;\"></div>\
         </div></li>",
        name = text(&skill.name),
        pct = pct,
    )
}

pub fn filter_button(category: &str, active: bool) -> String {
    format!(
        "<li class=\"filter-item\"><button{} data-filter-btn name=\"filter\" value=\"{}\">{}</button></li>",
        if active { " class=\"active\"" } else { "" },
        html_escape(&match_key(category)),
        html_escape(category),
    )
}

pub fn select_item(category: &str) -> String {
    format!(
        "<li class=\"select-item\"><button data-select-item name=\"filter\" value=\"{}\">{}</button></li>",
        html_escape(&match_key(category)),
        html_escape(category),
    )
}

pub fn project_item(project: &ProjectItem) -> String {
    let category = project.category.as_deref().unwrap_or("");
    format!(
        "<li class=\"project-item active\" data-filter-item data-category=\"{}\">\
         <a href=\"{}\"><figure class=\"project-img\">\
         <div class=\"project-item-icon-box\"><ion-icon name=\"eye-outline\"></ion-icon></div>\
         <img src=\"{}\" alt=\"{}\" loading=\"lazy\">\
         </figure>\
         <h3 class=\"project-title\">{}</h3>\
         <p class=\"project-category\">{}</p>\
         </a></li>",
        html_escape(&match_key(category)),
        url(&project.link),
        url(&project.image),
        text(&project.alt),
        text(&project.title),
        html_escape(category),
    )
}

pub fn blog_post_item(post: &BlogPostItem, dates: &DateStyle) -> String {
    let date = match &post.date {
        Some(raw) => time_element(raw, dates),
        None => String::new(),
    };
    format!(
        "<li class=\"blog-post-item\"><a href=\"{}\">\
         <figure class=\"blog-banner-box\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></figure>\
         <div class=\"blog-content\"><div class=\"blog-meta\">\
         <p class=\"blog-category\">{}</p><span class=\"dot\"></span>{}\
         </div>\
         <h3 class=\"h3 blog-item-title\">{}</h3>\
         <p class=\"blog-text\">{}</p>\
         </div></a></li>",
        url(&post.link),
        url(&post.image),
        text(&post.title),
        text(&post.category),
        date,
        text(&post.title),
        text(&post.excerpt),
    )
}

pub fn nav_item(item: &NavItem) -> String {
    let name = item.name.as_deref().unwrap_or("");
    format!(
        "<li class=\"navbar-item\"><button class=\"navbar-link{}\" data-nav-link name=\"page\" value=\"{}\">{}</button></li>",
        if item.active { " active" } else { "" },
        html_escape(&match_key(name)),
        html_escape(name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_is_escaped() {
        let item = TimelineItem {
            title: Some("<b>Lead</b>".into()),
            period: Some("2020 — Present".into()),
            description: Some("R&D".into()),
        };
        let html = timeline_item(&item);
        assert!(html.contains("&lt;b&gt;Lead&lt;/b&gt;"));
        assert!(html.contains("R&amp;D"));
        assert!(html.contains("2020 — Present"));
    }

    #[test]
    fn test_testimonial_text_is_sanitized_markup() {
        let t = TestimonialItem {
            name: Some("Dr. <i>Chen</i>".into()),
            avatar: Some("./a.png".into()),
            text: Some("Superb <em>work</em><script>steal()</script>".into()),
            date: None,
        };
        let html = testimonial_item(&t, 2, &DateStyle::default());
        assert!(html.contains("href=\"/?page=about&amp;testimonial=2\""));
        assert!(html.contains("<em>work</em>"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("steal()"));
        assert!(html.contains("Dr. &lt;i&gt;Chen&lt;/i&gt;"));
    }

    #[test]
    fn test_skill_percentage_is_clamped() {
        let html = skill_item(&SkillItem {
            name: Some("Rust".into()),
            percentage: Some(140.0),
        });
        assert!(html.contains("<data value=\"100\">100%</data>"));
        assert!(html.contains("width: 100%;"));
    }

    #[test]
    fn test_project_carries_lowercased_category() {
        let html = project_item(&ProjectItem {
            title: Some("A".into()),
            category: Some("Generative AI".into()),
            link: Some("javascript:alert(1)".into()),
            ..Default::default()
        });
        assert!(html.contains("data-category=\"generative ai\""));
        assert!(html.contains("<p class=\"project-category\">Generative AI</p>"));
        assert!(html.contains("<a href=\"#\">"));
    }

    #[test]
    fn test_blog_post_date() {
        let html = blog_post_item(
            &BlogPostItem {
                title: Some("Post".into()),
                date: Some("2024-01-15".into()),
                ..Default::default()
            },
            &DateStyle::default(),
        );
        assert!(html.contains("<time datetime=\"2024-01-15\">Jan 15, 2024</time>"));
    }

    #[test]
    fn test_service_without_icon_has_no_img() {
        let html = service_item(&ServiceItem {
            title: Some("Data".into()),
            description: None,
            icon: None,
        });
        assert!(!html.contains("<img"));
        assert!(html.contains("service-item-title\">Data</h4>"));
    }

    #[test]
    fn test_nav_item_value_and_active() {
        let html = nav_item(&NavItem {
            name: Some(" Resume ".into()),
            active: true,
        });
        assert!(html.contains("class=\"navbar-link active\""));
        assert!(html.contains("value=\"resume\""));
    }
}
