//! Per-profile session report
//!
//! Drives profile discovery, recovery file loading and extraction, isolating
//! failures so one broken profile never hides the others.

use anyhow::{Context, Result};
use serde::Serialize;

use firefox_session_core::{Profiles, Window};

/// Session of one profile as printed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileReport {
    /// Profile name (the part after the hash)
    pub profile: String,
    /// Open windows in session order
    pub windows: Vec<Window>,
}

/// Load every profile's session under `profiles`.
///
/// Profiles without a recovery file are left out. A profile whose file
/// cannot be decoded is logged and skipped, unless `strict` is set, in which
/// case the first such failure is returned.
pub fn collect(profiles: &Profiles, strict: bool) -> Result<Vec<ProfileReport>> {
    let iter = profiles
        .iter()
        .with_context(|| format!("Failed to list profiles in {:?}", profiles.root()))?;

    let mut reports = Vec::new();
    for profile in iter {
        match profile.recovery_document() {
            Ok(Some(doc)) => {
                tracing::debug!("Loaded {} ({} windows)", profile, doc.windows().len());
                reports.push(ProfileReport {
                    profile: profile.name.clone(),
                    windows: doc.into_windows(),
                });
            }
            Ok(None) => {
                tracing::debug!("Skipping {}: no session data", profile);
            }
            Err(e) if strict => {
                return Err(e).with_context(|| format!("Failed to read session of {}", profile));
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", profile, e);
            }
        }
    }

    Ok(reports)
}

/// Serialize reports as a JSON array, indented by four spaces when `pretty`
pub fn render(reports: &[ProfileReport], pretty: bool) -> Result<String> {
    if !pretty {
        return serde_json::to_string(reports).context("Failed to serialize report");
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    reports
        .serialize(&mut serializer)
        .context("Failed to serialize report")?;
    String::from_utf8(buf).context("Report is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use firefox_session_core::container;
    use firefox_session_core::list_profiles;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    fn session_json(url: &str) -> String {
        format!(
            r#"{{"windows":[{{"tabs":[{{"index":1,"lastAccessed":1700000000000,"entries":[{{"url":"{}","title":"T"}}]}}],"sizemode":"normal"}}]}}"#,
            url
        )
    }

    fn make_profile(root: &Path, dir_name: &str, recovery: Option<&[u8]>) {
        let dir = root.join(dir_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("times.json"), "{}").unwrap();
        if let Some(contents) = recovery {
            let backups = dir.join("sessionstore-backups");
            fs::create_dir_all(&backups).unwrap();
            fs::write(backups.join("recovery.jsonlz4"), contents).unwrap();
        }
    }

    fn sorted(mut reports: Vec<ProfileReport>) -> Vec<ProfileReport> {
        reports.sort_by(|a, b| a.profile.cmp(&b.profile));
        reports
    }

    #[test]
    fn test_collect_skips_missing_and_broken_profiles() {
        let dir = tempfile::tempdir().unwrap();
        make_profile(
            dir.path(),
            "aaaa.work",
            Some(&container::encode(session_json("https://work.test/").as_bytes())),
        );
        make_profile(dir.path(), "bbbb.empty", None);
        make_profile(dir.path(), "cccc.broken", Some(b"not a container"));
        make_profile(
            dir.path(),
            "dddd.home",
            Some(&container::encode(session_json("https://home.test/").as_bytes())),
        );

        let reports = sorted(collect(&list_profiles(dir.path()), false).unwrap());
        let names: Vec<&str> = reports.iter().map(|r| r.profile.as_str()).collect();
        assert_eq!(names, vec!["home", "work"]);
        assert_eq!(reports[0].windows[0].tabs[0].url, "https://home.test/");
        assert_eq!(reports[1].windows[0].tabs[0].url, "https://work.test/");
    }

    #[test]
    fn test_collect_strict_fails_on_broken_profile() {
        let dir = tempfile::tempdir().unwrap();
        make_profile(dir.path(), "cccc.broken", Some(b"not a container"));

        let err = collect(&list_profiles(dir.path()), true).unwrap_err();
        assert!(err.to_string().contains("profile broken"), "{err}");
    }

    #[test]
    fn test_collect_strict_tolerates_missing_recovery_file() {
        let dir = tempfile::tempdir().unwrap();
        make_profile(dir.path(), "bbbb.empty", None);

        let reports = collect(&list_profiles(dir.path()), true).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_render_pretty_uses_four_space_indent() {
        let reports = vec![ProfileReport {
            profile: "default".to_string(),
            windows: Vec::new(),
        }];
        let out = render(&reports, true).unwrap();
        assert_eq!(
            out,
            "[\n    {\n        \"profile\": \"default\",\n        \"windows\": []\n    }\n]"
        );
    }

    #[test]
    fn test_render_compact() {
        let out = render(&[], false).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_render_full_report_shape() {
        let dir = tempfile::tempdir().unwrap();
        make_profile(
            dir.path(),
            "aaaa.default",
            Some(&container::encode(session_json("https://a.test/").as_bytes())),
        );

        let reports = collect(&list_profiles(dir.path()), true).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&render(&reports, false).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "profile": "default",
                "windows": [{
                    "tabs": [{
                        "last_accessed": "2023-11-14T22:13:20Z",
                        "url": "https://a.test/",
                        "title": "T"
                    }],
                    "workspace": null,
                    "zindex": null,
                    "size": {"width": null, "height": null},
                    "position": {"x": null, "y": null},
                    "mode": "normal"
                }]
            }])
        );
    }
}
