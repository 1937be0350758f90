use log::error;
use rocket::tokio;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use super::{AcquireError, ContentSource, Origin};
use crate::content::{ContentDocument, ContentError};
use crate::settings::Settings;

/// Where the YAML content lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    File(PathBuf),
    Url(Url),
}

impl Location {
    /// `http(s)` URLs are fetched; anything else is a path under `root`.
    pub fn resolve(source: &str, root: &Path) -> Location {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Location::Url(url),
            _ => Location::File(root.join(source)),
        }
    }
}

/// Fetches a YAML text resource and parses it into the typed schema.
pub struct YamlSource {
    location: Location,
    timeout: Duration,
    /// Built only for URL locations. Holds the build error otherwise.
    client: Result<reqwest::Client, String>,
}

impl YamlSource {
    pub fn new(location: Location, timeout: Duration) -> Self {
        let client = match location {
            Location::File(_) => Err("not needed for file content".to_string()),
            Location::Url(_) => reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| {
                    error!("Failed to build HTTP client for YAML content: {}", e);
                    e.to_string()
                }),
        };
        YamlSource {
            location,
            timeout,
            client,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        YamlSource::new(
            Location::resolve(&settings.content.source, &settings.site.root),
            settings.fetch_timeout(),
        )
    }

    async fn fetch(&self) -> Result<String, AcquireError> {
        match &self.location {
            Location::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| AcquireError::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
            Location::Url(url) => {
                let http_err = |source| AcquireError::Http {
                    url: url.to_string(),
                    source,
                };
                let client = self.client.as_ref().map_err(|e| AcquireError::Client(e.clone()))?;
                let resp = client.get(url.clone()).send().await.map_err(http_err)?;
                if !resp.status().is_success() {
                    return Err(AcquireError::Status {
                        url: url.to_string(),
                        status: resp.status().as_u16(),
                    });
                }
                resp.text().await.map_err(http_err)
            }
        }
    }
}

#[rocket::async_trait]
impl ContentSource for YamlSource {
    fn origin(&self) -> Origin {
        Origin::Yaml
    }

    async fn load(&self) -> Result<ContentDocument, AcquireError> {
        let text = tokio::time::timeout(self.timeout, self.fetch())
            .await
            .map_err(|_| AcquireError::Timeout(self.timeout))??;
        parse(&text)
    }
}

/// Parse YAML text into a document. Blank text counts as absent content.
pub fn parse(text: &str) -> Result<ContentDocument, AcquireError> {
    if text.trim().is_empty() {
        return Err(ContentError::Empty.into());
    }
    Ok(serde_yaml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# leading comment
personal_info:
  name: "Ada Lovelace"
  title: Analyst   # trailing comment

resume:
  skills:
    title: Skills
    items:
      - name: Rust
        percentage: 90
      - { name: "Engines, analytical", percentage: 72.5 }
navigation:
  - name: About
    active: true
  - name: Resume
    active: false
blog:
  posts:
    - title: "Notes: on engines"
      date: 2024-01-15
      excerpt: |
        First line
        second line
"#;

    #[test]
    fn test_scalars_keep_their_types() {
        let doc = parse(SAMPLE).unwrap();

        let info = doc.personal_info.unwrap();
        assert_eq!(info.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(info.title.as_deref(), Some("Analyst"));

        let skills = doc.resume.unwrap().skills.unwrap().items.unwrap();
        assert_eq!(skills[0].percentage, Some(90.0));
        assert_eq!(skills[1].name.as_deref(), Some("Engines, analytical"));
        assert_eq!(skills[1].percentage, Some(72.5));

        let nav = doc.navigation.unwrap();
        assert!(nav[0].active);
        assert!(!nav[1].active);
    }

    #[test]
    fn test_colons_dates_and_block_scalars() {
        let doc = parse(SAMPLE).unwrap();
        let post = &doc.blog.unwrap().posts.unwrap()[0];
        assert_eq!(post.title.as_deref(), Some("Notes: on engines"));
        assert_eq!(post.date.as_deref(), Some("2024-01-15"));
        assert_eq!(post.excerpt.as_deref(), Some("First line\nsecond line\n"));
    }

    #[test]
    fn test_untyped_leaves_decode_by_kind() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("a: \"true\"\nb: true\nc: 42\nd: 4.5\ne: plain text\n").unwrap();
        assert_eq!(value["a"], serde_yaml::Value::from("true"));
        assert_eq!(value["b"], serde_yaml::Value::from(true));
        assert_eq!(value["c"].as_u64(), Some(42));
        assert_eq!(value["d"].as_f64(), Some(4.5));
        assert_eq!(value["e"].as_str(), Some("plain text"));
    }

    #[test]
    fn test_blank_text_is_empty_content() {
        assert!(matches!(
            parse("  \n\n"),
            Err(AcquireError::Content(ContentError::Empty))
        ));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        assert!(matches!(
            parse("about:\n  description: 12\n"),
            Err(AcquireError::Parse(_))
        ));
    }

    #[test]
    fn test_location_resolution() {
        let root = Path::new("site");
        assert_eq!(
            Location::resolve("content.yaml", root),
            Location::File(PathBuf::from("site/content.yaml"))
        );
        assert!(matches!(
            Location::resolve("https://example.com/content.yaml", root),
            Location::Url(_)
        ));
    }

    #[rocket::async_test]
    async fn test_missing_file_is_io_error() {
        let source = YamlSource::new(
            Location::File(PathBuf::from("does/not/exist.yaml")),
            Duration::from_secs(1),
        );
        assert!(matches!(source.load().await, Err(AcquireError::Io { .. })));
    }

    #[rocket::async_test]
    async fn test_unresponsive_server_times_out() {
        // Accepts at the socket level but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let url = Url::parse(&format!("http://{}/content.yaml", addr)).unwrap();

        // The client would wait far longer; only the outer bound can fire.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        let source = YamlSource {
            location: Location::Url(url),
            timeout: Duration::from_millis(200),
            client: Ok(client),
        };
        let started = std::time::Instant::now();
        let result = source.load().await;
        assert!(matches!(result, Err(AcquireError::Timeout(t)) if t == Duration::from_millis(200)));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[rocket::async_test]
    async fn test_missing_client_is_reported() {
        let source = YamlSource {
            location: Location::Url(Url::parse("http://127.0.0.1:9/content.yaml").unwrap()),
            timeout: Duration::from_secs(1),
            client: Err("tls backend unavailable".to_string()),
        };
        match source.load().await {
            Err(AcquireError::Client(reason)) => assert_eq!(reason, "tls backend unavailable"),
            other => panic!("expected client error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_file_location_builds_no_client() {
        let source = YamlSource::new(Location::File(PathBuf::from("content.yaml")), Duration::from_secs(1));
        assert!(source.client.is_err());
        let remote = YamlSource::new(
            Location::Url(Url::parse("https://example.com/content.yaml").unwrap()),
            Duration::from_secs(1),
        );
        assert!(remote.client.is_ok());
    }
}
