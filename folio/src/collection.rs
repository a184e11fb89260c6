//! A Folio project on disk
//!
//! [`Collection`] bundles the resolved configuration, the content layout and
//! the file system so callers can run every operation against one explicit
//! project root.

use crate::config::{Config, ContentLayout};
use crate::create::{create_record, CreatedRecord, NewRecord};
use crate::edit::{edit_record, open_record, EditOutcome, OpenRecord, RecordEdit};
use crate::error::Result;
use crate::fs_utils::{FileSystem, FileSystemUtils};
use crate::index::{search, SearchQuery, SearchResults};
use crate::site::{set_domain, DomainUpdate, SiteConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Records, site settings and configuration of one project
#[derive(Debug, Clone)]
pub struct Collection {
    config: Config,
    layout: ContentLayout,
    fs: FileSystemUtils,
}

impl Collection {
    /// Open the project at `project_root`, loading `folio.yaml` and `FOLIO_*`
    /// overrides
    pub fn open(project_root: impl Into<PathBuf>) -> Result<Self> {
        let project_root = project_root.into();
        let config = Config::load(&project_root)?;
        Ok(Self::with_config(config, project_root))
    }

    /// Project at `project_root` with an explicit configuration
    pub fn with_config(config: Config, project_root: impl Into<PathBuf>) -> Self {
        let layout = config.layout(project_root);
        Self {
            config,
            layout,
            fs: FileSystemUtils::new(),
        }
    }

    /// Replace the file system implementation
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = FileSystemUtils::with_fs(fs);
        self
    }

    /// Resolved configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Storage layout
    pub fn layout(&self) -> &ContentLayout {
        &self.layout
    }

    /// Project root
    pub fn root(&self) -> &Path {
        &self.layout.project_root
    }

    /// Site settings, read tolerantly; see [`SiteConfig::load`]
    pub fn site(&self) -> (SiteConfig, Option<String>) {
        SiteConfig::load(&self.fs, &self.layout)
    }

    /// Create a record, signed by the site author or the configured default
    pub fn create(&self, request: &NewRecord) -> Result<CreatedRecord> {
        let (site, site_warning) = self.site();
        let author = site
            .author()
            .unwrap_or(&self.config.default_author)
            .to_string();

        let mut created = create_record(
            self.fs.fs(),
            &self.config,
            &self.layout,
            &author,
            request,
        )?;
        if let Some(warning) = site_warning {
            created.warnings.insert(0, warning);
        }
        Ok(created)
    }

    /// Resolve and decode a record without changing it
    pub fn open_record(&self, input: &str) -> Result<OpenRecord> {
        open_record(self.fs.fs(), &self.layout, input)
    }

    /// Apply field edits and an optional new body to a record
    pub fn edit(&self, input: &str, edit: &RecordEdit) -> Result<EditOutcome> {
        edit_record(self.fs.fs(), &self.layout, input, edit)
    }

    /// Search the collection
    pub fn search(&self, query: &SearchQuery) -> SearchResults {
        search(self.fs.fs(), &self.layout, query)
    }

    /// Point the site at a custom domain
    pub fn set_domain(&self, input: &str) -> Result<DomainUpdate> {
        set_domain(&self.fs, &self.layout, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_utils::tests::MockFileSystem;
    use crate::normalize::CalendarDate;
    use tempfile::TempDir;

    fn project() -> (TempDir, Collection) {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("content")).unwrap();
        let collection = Collection::with_config(Config::default(), temp.path());
        (temp, collection)
    }

    #[test]
    fn test_create_edit_search_round_trip() {
        let (temp, collection) = project();
        let date = CalendarDate::parse("2024-03-05").unwrap();

        let created = collection
            .create(&NewRecord::new(date, "Hello World"))
            .unwrap();
        assert_eq!(
            created.dir,
            temp.path().join("content/2024/03/05/01-hello-world")
        );
        let text = std::fs::read_to_string(&created.path).unwrap();
        assert!(text.contains("status: draft\n"));
        assert!(text.ends_with("By Your Name\n\n"));

        let edit = RecordEdit {
            tags: Some("Rust".into()),
            status: Some("published".into()),
            ..Default::default()
        };
        collection
            .edit("content/2024/03/05/01-hello-world", &edit)
            .unwrap();

        let query = SearchQuery {
            text: "hello".into(),
            status: Some("published".into()),
            limit: 0,
        };
        let results = collection.search(&query);
        assert_eq!(results.total, 1);
        assert_eq!(results.entries[0].fields.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn test_create_uses_site_author() {
        let (temp, collection) = project();
        std::fs::write(
            temp.path().join("content/site.json"),
            r#"{"author": "Grace Hopper"}"#,
        )
        .unwrap();

        let created = collection
            .create(&NewRecord::new(CalendarDate::today(), "Bylines"))
            .unwrap();
        let text = std::fs::read_to_string(&created.path).unwrap();
        assert!(text.contains("\nBy Grace Hopper\n"));
    }

    #[test]
    fn test_create_with_broken_site_json_still_succeeds() {
        let (temp, collection) = project();
        std::fs::write(temp.path().join("content/site.json"), "{").unwrap();

        let created = collection
            .create(&NewRecord::new(CalendarDate::today(), "Bylines"))
            .unwrap();
        assert_eq!(created.warnings.len(), 1);
        let text = std::fs::read_to_string(&created.path).unwrap();
        assert!(text.contains("\nBy Your Name\n"));
    }

    #[test]
    fn test_injected_filesystem_serves_every_operation() {
        let mock = Arc::new(MockFileSystem::default());
        mock.create_dir_all(Path::new("/blog/content")).unwrap();
        let collection =
            Collection::with_config(Config::default(), "/blog").with_fs(mock.clone());

        let date = CalendarDate::parse("2024-03-05").unwrap();
        let created = collection
            .create(&NewRecord::new(date, "In Memory"))
            .unwrap();
        assert!(mock.file(&created.path).is_some());

        let results = collection.search(&SearchQuery::new("memory"));
        assert_eq!(results.total, 1);
        assert_eq!(
            results.entries[0].path,
            "content/2024/03/05/01-in-memory/article.md"
        );
    }

    #[test]
    fn test_second_same_day_record() {
        let (_temp, collection) = project();
        let date = CalendarDate::parse("2024-03-05").unwrap();
        collection
            .create(&NewRecord::new(date, "Hello World"))
            .unwrap();
        let second = collection
            .create(&NewRecord::new(date, "Hello World"))
            .unwrap();
        assert!(second.dir.ends_with("2024/03/05/02-hello-world"));
    }
}
