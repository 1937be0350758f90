use log::{error, warn};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the settings file, relative to the working directory.
pub const SETTINGS_FILE: &str = "folio.toml";

/// Runtime settings read from `folio.toml`. Every key has a default, so a
/// missing file or a partial one still yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site: SiteSettings,
    pub content: ContentSettings,
    pub render: RenderSettings,
    pub contact: ContactSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Directory holding the shell, the YAML content and `assets/`.
    pub root: PathBuf,
    /// Shell file name inside `root`.
    pub shell: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            root: PathBuf::from("site"),
            shell: "index.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Install the document bundled into the binary at boot.
    pub embedded: bool,
    /// YAML location: a path relative to `site.root`, or an http(s) URL.
    pub source: String,
    pub fetch_timeout_secs: u64,
}

impl Default for ContentSettings {
    fn default() -> Self {
        ContentSettings {
            embedded: true,
            source: "content.yaml".to_string(),
            fetch_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// POSIX locale name used for date labels, e.g. `en_US` or `fr_FR`.
    pub locale: String,
    /// strftime pattern for date labels.
    pub date_format: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            locale: "en_US".to_string(),
            date_format: "%b %-d, %Y".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub rate_limit: u64,
    pub rate_window_secs: u64,
    /// Peers whose `X-Real-IP` / `X-Forwarded-For` headers name the client.
    /// Empty means the socket peer is always the client.
    pub trusted_proxies: Vec<IpAddr>,
}

impl Default for ContactSettings {
    fn default() -> Self {
        ContactSettings {
            rate_limit: 5,
            rate_window_secs: 600,
            trusted_proxies: Vec::new(),
        }
    }
}

impl Settings {
    /// Read settings from `path`. Problems are logged and defaults used.
    pub fn load(path: impl AsRef<Path>) -> Settings {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} not found, using default settings", path.display());
                return Settings::default();
            }
            Err(e) => {
                error!("Failed to read {}: {}. Using defaults.", path.display(), e);
                return Settings::default();
            }
        };
        Self::parse(&raw).unwrap_or_else(|e| {
            error!("Invalid {}: {}. Using defaults.", path.display(), e);
            Settings::default()
        })
    }

    pub fn parse(raw: &str) -> Result<Settings, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    pub fn shell_path(&self) -> PathBuf {
        self.site.root.join(&self.site.shell)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.site.root.join("assets")
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.content.fetch_timeout_secs.max(1))
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.contact.rate_window_secs)
    }
}
