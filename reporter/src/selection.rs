use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which files of the reports directory are treated as reports.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Selection {
    #[serde(default = "default_extension")]
    pub extension: String,
    // A name must contain at least one of these. Empty accepts any name.
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_extension() -> String {
    "xml".to_owned()
}

fn default_include() -> Vec<String> {
    vec!["mpcarnagereport".to_owned(), "asq_".to_owned()]
}

fn default_exclude() -> Vec<String> {
    vec!["test_trigger".to_owned()]
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            extension: default_extension(),
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}

impl Selection {
    pub fn is_report_file(&self, name: &str) -> bool {
        name.strip_suffix(self.extension.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
            && (self.include.is_empty() || self.include.iter().any(|s| name.contains(s.as_str())))
            && !self.exclude.iter().any(|s| name.contains(s.as_str()))
    }

    /// Regular files of `dir` accepted by `is_report_file`, sorted by name.
    pub async fn list_reports(&self, dir: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut reports = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                log::warn!("Skipping file with non UTF-8 name {name:?}");
                continue;
            };
            if !self.is_report_file(name) {
                log::trace!("Skipping {name}");
                continue;
            }
            // Follows symlinks, unlike DirEntry::file_type. An entry that
            // cannot be inspected is kept so reading it fails per file.
            match tokio::fs::metadata(entry.path()).await {
                Ok(metadata) if !metadata.is_file() => continue,
                Ok(_) => {}
                Err(e) => log::warn!("Failed to inspect {name}: {e}"),
            }
            reports.push(entry.path());
        }
        reports.sort();
        Ok(reports)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_report_file() {
        let s = Selection::default();
        assert!(s.is_report_file("foo_mpcarnagereport1.xml"));
        assert!(s.is_report_file("asq_valhalla_1.xml"));
        assert!(s.is_report_file(
            "CYR1X-2026-01-20-18-14-04-mpcarnagereport1_3528_0_0.xml"
        ));
        assert!(!s.is_report_file("report_test_trigger.xml"));
        assert!(!s.is_report_file("mpcarnagereport_test_trigger.xml"));
        assert!(!s.is_report_file("notes.txt"));
        assert!(!s.is_report_file("mpcarnagereport1.xml.bak"));
        assert!(!s.is_report_file("mpcarnagereport1xml"));
        assert!(!s.is_report_file("settings.xml"));
    }

    #[test]
    fn test_empty_include_accepts_any_name() {
        let s = Selection {
            include: vec![],
            ..Default::default()
        };
        assert!(s.is_report_file("settings.xml"));
        assert!(!s.is_report_file("settings_test_trigger.xml"));
    }

    #[tokio::test]
    async fn test_list_reports() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for name in [
            "report_test_trigger.xml",
            "foo_mpcarnagereport1.xml",
            "notes.txt",
        ] {
            tokio::fs::write(dir.path().join(name), b"<CarnageReport />")
                .await
                .unwrap();
        }
        tokio::fs::create_dir(dir.path().join("asq_directory.xml"))
            .await
            .unwrap();
        let reports = Selection::default()
            .list_reports(dir.path())
            .await
            .expect("Failed to list reports");
        assert_eq!(reports, vec![dir.path().join("foo_mpcarnagereport1.xml")]);
    }

    #[tokio::test]
    async fn test_list_reports_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_asq_chill.xml", "a_mpcarnagereport.xml", "c_asq_epitaph.xml"] {
            tokio::fs::write(dir.path().join(name), b"").await.unwrap();
        }
        let reports = Selection::default().list_reports(dir.path()).await.unwrap();
        let names = reports
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            ["a_mpcarnagereport.xml", "b_asq_chill.xml", "c_asq_epitaph.xml"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_reports_keeps_dangling_symlink() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("a_mpcarnagereport1.xml"), b"")
            .await
            .unwrap();
        tokio::fs::symlink(
            dir.path().join("gone.xml"),
            dir.path().join("b_mpcarnagereport1.xml"),
        )
        .await
        .unwrap();
        let reports = Selection::default()
            .list_reports(dir.path())
            .await
            .expect("Listing must not fail on one bad entry");
        assert_eq!(
            reports,
            vec![
                dir.path().join("a_mpcarnagereport1.xml"),
                dir.path().join("b_mpcarnagereport1.xml"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Selection::default()
            .list_reports(dir.path().join("missing"))
            .await
            .is_err());
    }
}
