use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::acquire::yaml::Location;
use crate::settings::{Settings, SETTINGS_FILE};

/// Directories under the site root, created if missing.
const REQUIRED_DIRS: &[&str] = &["assets", "assets/css", "assets/images"];

/// Static assets the shell links to; missing ones only degrade styling.
const EXPECTED_ASSETS: &[&str] = &["assets/css/style.css"];

#[derive(Debug, Default, PartialEq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

/// Inspect the site layout described by `settings` without aborting.
pub fn check(settings: &Settings) -> BootReport {
    let mut report = BootReport::default();
    let root = &settings.site.root;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = root.join(dir);
        if !path.exists() {
            match fs::create_dir_all(&path) {
                Ok(_) => info!("  Created directory: {}", path.display()),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", path.display(), e);
                    report.errors += 1;
                }
            }
        }
    }

    // ── 2. Shell ───────────────────────────────────────
    let shell = settings.shell_path();
    if !shell.is_file() {
        error!("  MISSING page shell: {}", shell.display());
        report.errors += 1;
    }

    // ── 3. Assets ──────────────────────────────────────
    for file in EXPECTED_ASSETS {
        let path = root.join(file);
        if !path.exists() {
            warn!("  Missing static asset: {} (page will be unstyled)", path.display());
            report.warnings += 1;
        }
    }

    // ── 4. YAML content ────────────────────────────────
    if let Location::File(path) = Location::resolve(&settings.content.source, root) {
        if !path.exists() {
            if settings.content.embedded {
                info!("  No YAML content at {} (embedded content is enabled)", path.display());
            } else {
                warn!(
                    "  YAML content {} not found and embedded content is disabled; fallback will be served",
                    path.display()
                );
                report.warnings += 1;
            }
        }
    }

    // ── 5. Config files ────────────────────────────────
    if !Path::new(SETTINGS_FILE).exists() {
        warn!("  {} not found, using default settings", SETTINGS_FILE);
        report.warnings += 1;
    }
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found, using default server config");
        report.warnings += 1;
    }

    report
}

/// Run all boot checks. Call this before Rocket launches.
/// Aborts the process if the site cannot be served.
pub fn run(settings: &Settings) {
    info!("Folio boot check starting...");

    let report = check(settings);

    if report.errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        process::exit(1);
    }

    if report.warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            report.warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-boot-{}-{}", name, process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_shell_is_an_error() {
        let mut settings = Settings::default();
        settings.site.root = scratch("noshell");
        let report = check(&settings);
        assert_eq!(report.errors, 1);
        assert!(settings.site.root.join("assets/images").is_dir());
    }

    #[test]
    fn test_complete_site_has_no_errors() {
        let mut settings = Settings::default();
        settings.site.root = scratch("complete");
        fs::create_dir_all(settings.site.root.join("assets/css")).unwrap();
        fs::write(settings.shell_path(), "<html></html>").unwrap();
        fs::write(settings.site.root.join("assets/css/style.css"), "").unwrap();
        fs::write(settings.site.root.join("content.yaml"), "blog: {}").unwrap();
        assert_eq!(check(&settings).errors, 0);
    }

    #[test]
    fn test_remote_content_is_not_checked_on_disk() {
        let site = |name: &str, source: &str| {
            let mut settings = Settings::default();
            settings.site.root = scratch(name);
            settings.content.embedded = false;
            settings.content.source = source.to_string();
            fs::create_dir_all(settings.site.root.join("assets/css")).unwrap();
            fs::write(settings.shell_path(), "<html></html>").unwrap();
            fs::write(settings.site.root.join("assets/css/style.css"), "").unwrap();
            settings
        };

        let local = check(&site("local-yaml", "content.yaml"));
        let remote = check(&site("remote-yaml", "HTTPS://example.com/content.yaml"));
        assert_eq!(local.warnings, remote.warnings + 1);
        assert_eq!(remote.errors, 0);
    }
}
