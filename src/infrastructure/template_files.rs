// Template store backed by a directory of TOML files, one template set per file
use crate::application::error::GraphsError;
use crate::application::template_store::TemplateStore;
use crate::domain::graph_template::TemplateSet;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    path: PathBuf,
}

impl FileTemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn template_files(&self) -> Result<Vec<PathBuf>, GraphsError> {
        let mut entries = tokio::fs::read_dir(&self.path)
            .await
            .map_err(|e| unavailable(&self.path, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| unavailable(&self.path, e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    async fn load_file(path: &Path) -> Result<TemplateSet, GraphsError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| unavailable(path, e))?;
        let mut set: TemplateSet = toml::from_str(&content).map_err(|e| unavailable(path, e))?;

        if set.name.is_empty() {
            set.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        Ok(set)
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn load_template_sets(&self) -> Result<Vec<TemplateSet>, GraphsError> {
        let mut sets = Vec::new();
        for file in self.template_files().await? {
            sets.push(Self::load_file(&file).await?);
        }

        tracing::debug!(
            "Loaded {} template sets from {}",
            sets.len(),
            self.path.display()
        );
        Ok(sets)
    }
}

fn unavailable(path: &Path, error: impl std::fmt::Display) -> GraphsError {
    GraphsError::TemplateStoreUnavailable(format!("{}: {}", path.display(), error))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICINGA2_SET: &str = r#"
[base_patterns]
icingaHost = "icinga2.$hostname.host.$host_check_command"
icingaService = "icinga2.$hostname.services.$service.$service_check_command"

[[templates]]
name = "hostalive"
title = "$metric"
filter = "icinga2.$hostname.host.hostalive.perfdata.$metric.value"

[[templates]]
name = "ping4"
filter = "icinga2.$hostname.services.$service.ping4.perfdata.$metric.value"
"#;

    #[tokio::test]
    async fn test_load_sets_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-icinga2.toml"), ICINGA2_SET).unwrap();
        std::fs::write(
            dir.path().join("a-custom.toml"),
            "name = \"custom\"\n[base_patterns]\nicingaHost = \"x.$hostname\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("README.md"), "not a template").unwrap();

        let sets = FileTemplateStore::new(dir.path())
            .load_template_sets()
            .await
            .unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "custom");
        assert!(sets[0].templates.is_empty());
        assert_eq!(sets[1].name, "b-icinga2");
        assert_eq!(sets[1].templates.len(), 2);
        assert_eq!(sets[1].templates[1].name, "ping4");
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileTemplateStore::new(dir.path().join("missing"))
            .load_template_sets()
            .await
            .unwrap_err();
        assert!(matches!(err, GraphsError::TemplateStoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[[templates]]\nname = \"x\"\n").unwrap();

        let err = FileTemplateStore::new(dir.path())
            .load_template_sets()
            .await
            .unwrap_err();
        match err {
            GraphsError::TemplateStoreUnavailable(message) => {
                assert!(message.contains("broken.toml"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
