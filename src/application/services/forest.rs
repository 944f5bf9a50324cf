//! Forest persistence service
//!
//! Loads forests from delimited text and snapshots, saves snapshots and
//! exports delimited text. All file access goes through [`FileSystem`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::application::snapshot;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::{Settings, TextLoadPolicy};
use crate::domain::{parse_records, DomainError, DomainResult, Forest, Tree};
use crate::infrastructure::traits::FileSystem;

/// Service for moving forests between memory and disk.
pub struct ForestService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl ForestService {
    /// Create a new forest service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Where the snapshot of the named forest lives.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.settings.snapshot_path(name)
    }

    /// Append the records of a delimited text file using the configured policy.
    ///
    /// Returns the number of trees appended.
    pub fn load_text(&self, forest: &mut Forest, path: &Path) -> ApplicationResult<usize> {
        self.load_text_with(forest, path, self.settings.text_load)
    }

    /// Append the records of a delimited text file.
    ///
    /// With [`TextLoadPolicy::AllOrNothing`] the forest is only touched when
    /// every line parses. With [`TextLoadPolicy::Partial`] trees parsed before
    /// the failing line stay appended.
    #[instrument(skip(self, forest), fields(forest = forest.name()))]
    pub fn load_text_with(
        &self,
        forest: &mut Forest,
        path: &Path,
        policy: TextLoadPolicy,
    ) -> ApplicationResult<usize> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read forest text", path)?;
        let records = parse_records(&content);

        let count = match policy {
            TextLoadPolicy::AllOrNothing => {
                let trees: Vec<Tree> = records
                    .collect::<DomainResult<_>>()
                    .map_err(|e| rejected(path, e))?;
                let count = trees.len();
                forest.extend(trees);
                count
            }
            TextLoadPolicy::Partial => {
                let mut count = 0;
                for record in records {
                    forest.push(record.map_err(|e| rejected(path, e))?);
                    count += 1;
                }
                count
            }
        };

        debug!("load_text: appended {} trees from {}", count, path.display());
        Ok(count)
    }

    /// Replace the forest's trees with the contents of a snapshot file.
    ///
    /// On any failure the forest is left as it was.
    #[instrument(skip(self, forest), fields(forest = forest.name()))]
    pub fn load_snapshot(&self, forest: &mut Forest, path: &Path) -> ApplicationResult<usize> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read snapshot", path)?;
        let snapshot = snapshot::decode(&content, path)?;
        if snapshot.name != forest.name() {
            debug!(
                "load_snapshot: snapshot was saved as '{}', loading into '{}'",
                snapshot.name,
                forest.name()
            );
        }

        let count = snapshot.trees.len();
        forest.replace_trees(snapshot.trees);
        debug!(
            "load_snapshot: {} trees saved at {}",
            count, snapshot.saved_at
        );
        Ok(count)
    }

    /// Snapshot path for a name that must stay inside `snapshot_dir`.
    fn checked_snapshot_path(&self, name: &str) -> ApplicationResult<PathBuf> {
        validate_forest_name(name)?;
        Ok(self.snapshot_path(name))
    }

    /// Load the named forest from its snapshot.
    pub fn open(&self, name: &str) -> ApplicationResult<Forest> {
        let path = self.checked_snapshot_path(name)?;
        let mut forest = Forest::new(name);
        self.load_snapshot(&mut forest, &path)?;
        Ok(forest)
    }

    /// Load the named forest, or start an empty one if it has no snapshot yet.
    pub fn open_or_new(&self, name: &str) -> ApplicationResult<Forest> {
        if self.fs.exists(&self.checked_snapshot_path(name)?) {
            self.open(name)
        } else {
            debug!("open_or_new: no snapshot for '{}', starting empty", name);
            Ok(Forest::new(name))
        }
    }

    /// Write the forest to `<snapshot_dir>/<name>.<extension>`, overwriting.
    ///
    /// A failed write is logged and returned; the previous snapshot survives.
    #[instrument(skip(self, forest), fields(forest = forest.name()))]
    pub fn save_snapshot(&self, forest: &Forest) -> ApplicationResult<PathBuf> {
        let path = self.checked_snapshot_path(forest.name())?;
        let content = snapshot::encode(forest, Utc::now())?;

        let written = self
            .fs
            .ensure_parent(&path)
            .and_then(|()| self.fs.write_atomic(&path, &content))
            .with_path_context("write snapshot", &path);
        if let Err(e) = written {
            warn!("Unable to save file - try again: {}", e);
            return Err(e);
        }

        debug!("save_snapshot: {} trees to {}", forest.len(), path.display());
        Ok(path)
    }

    /// Write every tree as one delimited text line. Returns the number of lines.
    pub fn export_text(&self, forest: &Forest, path: &Path) -> ApplicationResult<usize> {
        let mut content = String::new();
        for tree in forest.trees() {
            content.push_str(&tree.to_delimited_text());
            content.push('\n');
        }
        self.fs
            .ensure_parent(path)
            .and_then(|()| self.fs.write_atomic(path, &content))
            .with_path_context("write forest text", path)?;
        Ok(forest.len())
    }
}

/// Forest names become file names, so they may not leave the snapshot directory.
pub fn validate_forest_name(name: &str) -> ApplicationResult<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name == "." || name == ".." {
        Some("name is a relative directory")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ApplicationError::InvalidForestName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn rejected(path: &Path, e: DomainError) -> ApplicationError {
    match &e {
        DomainError::InvalidSpecies { .. } => {
            warn!("Invalid species in {}: {}", path.display(), e)
        }
        _ => warn!("Rejected {}: {}", path.display(), e),
    }
    ApplicationError::Domain(e)
}
