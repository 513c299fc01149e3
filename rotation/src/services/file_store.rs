//! JSON file rotation store
//!
//! The whole ledger lives in one JSON snapshot. Each mutation is applied to
//! a copy, the copy is written to a sibling temp file and renamed over the
//! snapshot, and only then does the in-memory ledger move forward. A failed
//! write leaves both the file and the cached ledger at the previous state,
//! and removes the temp file.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{AssignmentPair, AssignmentSet, GuildId, MemberId, RotationId};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::core::{Rotation, RotationLedger};
use crate::error::{RotationError, RotationResult};
use crate::traits::RotationStore;

/// File-backed store
pub struct FileRotationStore {
    /// Snapshot location
    path: PathBuf,

    /// Sibling written before each rename, `<name>.tmp`
    temp_path: PathBuf,

    /// Cached ledger; the write lock is held across each persist
    ledger: RwLock<RotationLedger>,
}

impl FileRotationStore {
    /// Open the snapshot at `path`, starting empty if it does not exist
    ///
    /// # Errors
    /// `ConfigurationError` if `path` has no file name, `IoError` if the file
    /// exists but cannot be read, `JsonError` if it is not a valid snapshot
    pub async fn open(path: impl Into<PathBuf>) -> RotationResult<Self> {
        let path = path.into();
        let mut temp_name = path
            .file_name()
            .ok_or_else(|| RotationError::config(format!("store path {}", path.display())))?
            .to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        let ledger = Self::load(&path).await?;

        info!(
            path = %path.display(),
            rotations = ledger.len(),
            "📂 Opened rotation store"
        );

        Ok(Self {
            path,
            temp_path,
            ledger: RwLock::new(ledger),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path) -> RotationResult<RotationLedger> {
        match fs::read_to_string(path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(RotationLedger::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RotationLedger::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `ledger` to a temp file and rename it over the snapshot
    async fn persist(&self, ledger: &RotationLedger) -> RotationResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_vec_pretty(ledger)?;
        if let Err(e) = self.replace_snapshot(&contents).await {
            if let Err(cleanup) = fs::remove_file(&self.temp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        path = %self.temp_path.display(),
                        error = %cleanup,
                        "⚠️ Could not remove temp snapshot"
                    );
                }
            }
            return Err(e.into());
        }

        debug!(
            path = %self.path.display(),
            rotations = ledger.len(),
            bytes = contents.len(),
            "💾 Persisted rotation snapshot"
        );
        Ok(())
    }

    async fn replace_snapshot(&self, contents: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(&self.temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&self.temp_path, &self.path).await
    }

    /// Apply `change` to a copy of the ledger and commit it once persisted
    async fn mutate<T, F>(&self, change: F) -> RotationResult<T>
    where
        F: FnOnce(&mut RotationLedger) -> RotationResult<T>,
    {
        let mut ledger = self.ledger.write().await;
        let mut next = ledger.clone();
        let value = change(&mut next)?;

        self.persist(&next).await?;
        *ledger = next;
        Ok(value)
    }
}

#[async_trait]
impl RotationStore for FileRotationStore {
    async fn insert_rotation(&self, rotation: Rotation) -> RotationResult<()> {
        self.mutate(|ledger| ledger.insert(rotation)).await
    }

    async fn get_rotation(&self, rotation_id: RotationId) -> RotationResult<Option<Rotation>> {
        Ok(self.ledger.read().await.get(rotation_id).cloned())
    }

    async fn open_rotation_for_guild(&self, guild_id: &GuildId) -> RotationResult<Option<Rotation>> {
        Ok(self.ledger.read().await.open_for_guild(guild_id).cloned())
    }

    async fn latest_rotation_for_guild(&self, guild_id: &GuildId) -> RotationResult<Option<Rotation>> {
        Ok(self.ledger.read().await.latest_for_guild(guild_id).cloned())
    }

    async fn add_member(&self, rotation_id: RotationId, member: MemberId) -> RotationResult<Rotation> {
        self.mutate(|ledger| ledger.add_member(rotation_id, member).cloned())
            .await
    }

    async fn set_message_id(&self, rotation_id: RotationId, message_id: String) -> RotationResult<()> {
        self.mutate(|ledger| ledger.set_message_id(rotation_id, message_id))
            .await
    }

    async fn delete_rotation(&self, rotation_id: RotationId) -> RotationResult<Rotation> {
        self.mutate(|ledger| ledger.remove_open(rotation_id)).await
    }

    async fn assignment_history(
        &self,
        guild_id: &GuildId,
        members: &[MemberId],
    ) -> RotationResult<Vec<AssignmentPair>> {
        Ok(self.ledger.read().await.assignment_history(guild_id, members))
    }

    async fn finalize_rotation(
        &self,
        rotation_id: RotationId,
        assignments: AssignmentSet,
        started_at: DateTime<Utc>,
    ) -> RotationResult<Rotation> {
        self.mutate(|ledger| {
            ledger
                .finalize(rotation_id, assignments, started_at)
                .cloned()
        })
        .await
    }
}
