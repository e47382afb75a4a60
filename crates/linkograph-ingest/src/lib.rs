//! Dataset loading for linkograph
//!
//! Reads the per-domain collections (one JSON file per domain, entity id →
//! record) into memory for a single validation run.
//!
//! **Untrusted boundary**: domain files are hand/AI-edited. Loading fails
//! soft per file: an unreadable or unparsable file becomes a recorded
//! failure and that domain is simply absent from the run, so one bad file
//! never costs the comprehensive report. Only the total absence of every
//! requested domain file is fatal.

use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use linkograph_model::{Domain, DomainRecords};

/// One domain file that could not be loaded.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub domain: Domain,
    /// The path that failed, or the path we looked for if nothing existed.
    pub path: PathBuf,
    pub message: String,
}

/// Everything a validation run needs from disk, loaded once.
#[derive(Debug, Default)]
pub struct DatasetLoad {
    pub root: PathBuf,
    /// Successfully loaded collections, in deterministic domain order.
    pub domains: BTreeMap<Domain, DomainRecords>,
    /// Per-file soft failures (missing file, bad JSON, wrong shape).
    pub failures: Vec<LoadFailure>,
}

impl DatasetLoad {
    pub fn entity_count(&self) -> usize {
        self.domains.values().map(BTreeMap::len).sum()
    }

    /// Entities loaded per domain, for the report header.
    pub fn domain_counts(&self) -> BTreeMap<Domain, usize> {
        self.domains
            .iter()
            .map(|(domain, records)| (*domain, records.len()))
            .collect()
    }
}

/// Find `<slug>.json` for a domain: directly under `root`, else the first
/// match (sorted walk, so deterministic) anywhere below it.
fn find_domain_file(root: &Path, domain: Domain) -> Option<PathBuf> {
    let file_name = format!("{}.json", domain.slug());
    let direct = root.join(&file_name);
    if direct.is_file() {
        return Some(direct);
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name.as_str())
        .map(|entry| entry.into_path())
}

fn load_domain_file(path: &Path) -> Result<DomainRecords> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    if !value.is_object() {
        return Err(anyhow!(
            "{}: expected a top-level object mapping entity id -> record",
            path.display()
        ));
    }
    let records: DomainRecords = serde_json::from_value(value)
        .with_context(|| format!("unexpected record shape in {}", path.display()))?;
    Ok(records)
}

/// Load all requested domain collections from `root`.
///
/// Returns `Err` only for unrecoverable conditions: the dataset directory
/// does not exist, or none of the requested domain files could be loaded.
pub fn load_dataset(root: &Path, filter: Option<Domain>) -> Result<DatasetLoad> {
    if !root.is_dir() {
        return Err(anyhow!(
            "dataset directory not found: {}",
            root.display()
        ));
    }

    let requested: Vec<Domain> = match filter {
        Some(domain) => vec![domain],
        None => Domain::ALL.to_vec(),
    };

    let mut load = DatasetLoad {
        root: root.to_path_buf(),
        ..DatasetLoad::default()
    };

    for domain in requested {
        let Some(path) = find_domain_file(root, domain) else {
            tracing::warn!(domain = %domain, "no domain file found");
            load.failures.push(LoadFailure {
                domain,
                path: root.join(format!("{}.json", domain.slug())),
                message: "domain file not found".to_string(),
            });
            continue;
        };

        match load_domain_file(&path) {
            Ok(records) => {
                tracing::debug!(domain = %domain, path = %path.display(), entities = records.len(), "loaded domain file");
                load.domains.insert(domain, records);
            }
            Err(err) => {
                tracing::warn!(domain = %domain, path = %path.display(), "failed to load domain file: {err:#}");
                load.failures.push(LoadFailure {
                    domain,
                    path,
                    message: format!("{err:#}"),
                });
            }
        }
    }

    if load.domains.is_empty() {
        return Err(anyhow!(
            "no loadable domain files under {} ({} failure(s))",
            root.display(),
            load.failures.len()
        ));
    }

    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn loads_all_present_domains() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "materials.json",
            r#"{"steel": {"name": "Steel", "category": "metal", "subcategory": "ferrous"}}"#,
        );
        write(dir.path(), "contaminants.json", r#"{"rust": {"name": "Rust"}}"#);

        let load = load_dataset(dir.path(), None).unwrap();
        assert_eq!(load.domains.len(), 2);
        assert_eq!(load.entity_count(), 2);
        // compounds + settings files were absent, recorded as soft failures
        assert_eq!(load.failures.len(), 2);
    }

    #[test]
    fn finds_domain_files_in_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        write(
            &dir.path().join("data"),
            "materials.json",
            r#"{"steel": {}}"#,
        );

        let load = load_dataset(dir.path(), Some(Domain::Materials)).unwrap();
        assert_eq!(load.domain_counts()[&Domain::Materials], 1);
        assert!(load.failures.is_empty());
    }

    #[test]
    fn bad_json_is_a_soft_failure() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "materials.json", r#"{"steel": {}}"#);
        write(dir.path(), "compounds.json", "{not json");

        let load = load_dataset(dir.path(), None).unwrap();
        assert!(load.domains.contains_key(&Domain::Materials));
        assert!(!load.domains.contains_key(&Domain::Compounds));
        assert!(load
            .failures
            .iter()
            .any(|f| f.domain == Domain::Compounds && f.message.contains("invalid JSON")));
    }

    #[test]
    fn top_level_array_is_a_soft_failure() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "materials.json", r#"{"steel": {}}"#);
        write(dir.path(), "settings.json", r#"[{"id": "steel"}]"#);

        let load = load_dataset(dir.path(), None).unwrap();
        assert!(load
            .failures
            .iter()
            .any(|f| f.domain == Domain::Settings && f.message.contains("top-level object")));
    }

    #[test]
    fn missing_dataset_directory_is_fatal() {
        let err = load_dataset(Path::new("/nonexistent/linkograph-dataset"), None).unwrap_err();
        assert!(err.to_string().contains("dataset directory not found"));
    }

    #[test]
    fn no_loadable_domain_at_all_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "materials.json", "{broken");
        let err = load_dataset(dir.path(), Some(Domain::Materials)).unwrap_err();
        assert!(err.to_string().contains("no loadable domain files"));
    }

    #[test]
    fn domain_filter_only_touches_requested_domain() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "materials.json", r#"{"steel": {}}"#);
        write(dir.path(), "contaminants.json", "{broken");

        let load = load_dataset(dir.path(), Some(Domain::Materials)).unwrap();
        assert_eq!(load.domains.len(), 1);
        assert!(load.failures.is_empty());
    }
}
