//! File-based Session Store Adapter
//!
//! One YAML document per user under a base directory. Writes go to a
//! temporary file first and are renamed into place.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::ConversationSession;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `base_path`. The directory is created on
    /// first write.
    ///
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_path(&self, user_id: &UserId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", file_stem(user_id)))
    }

    async fn ensure_dir(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| DomainError::storage(format!("create {}: {}", self.base_path.display(), e)))
    }
}

/// User ids are used verbatim when filesystem-safe, hex-encoded otherwise.
fn file_stem(user_id: &UserId) -> String {
    let raw = user_id.as_str();
    let safe = raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if safe {
        raw.to_string()
    } else {
        let hex: String = raw.bytes().map(|b| format!("{:02x}", b)).collect();
        format!("x-{}", hex)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<ConversationSession>, DomainError> {
        let path = self.session_path(user_id);

        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::storage(format!("read {}: {}", path.display(), e))),
        };

        let session = serde_yaml::from_str(&yaml)
            .map_err(|e| DomainError::storage(format!("decode {}: {}", path.display(), e)))?;

        Ok(Some(session))
    }

    async fn save(&self, session: &ConversationSession) -> Result<(), DomainError> {
        self.ensure_dir().await?;

        let path = self.session_path(session.user_id());
        let tmp = path.with_extension("yaml.tmp");

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| DomainError::storage(format!("encode session: {}", e)))?;

        fs::write(&tmp, yaml)
            .await
            .map_err(|e| DomainError::storage(format!("write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| DomainError::storage(format!("rename {}: {}", path.display(), e)))?;

        tracing::debug!(user_id = %session.user_id(), path = %path.display(), "session saved");
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), DomainError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(DomainError::storage(e.to_string())),
        };

        let mut removed = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                fs::remove_file(&path)
                    .await
                    .map_err(|e| DomainError::storage(format!("remove {}: {}", path.display(), e)))?;
                removed += 1;
            }
        }

        tracing::info!(removed, dir = %self.base_path.display(), "all sessions cleared");
        Ok(())
    }
}
