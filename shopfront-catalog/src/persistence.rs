//! Persistence gateway for the catalog snapshot
//!
//! The snapshot is a single JSON document with an adjacent backup copy.
//! Loads never fail: a corrupt primary falls back to the backup, and a
//! corrupt backup falls back to the built-in default snapshot. Saves are
//! atomic (temp file + rename) and back up the previous primary first.

use shopfront_common::model::{FeaturedTag, Item, Snapshot};
use shopfront_common::{Error, Result};
use std::path::{Path, PathBuf};

/// Primary snapshot file name inside the data folder
pub const SNAPSHOT_FILE: &str = "catalog.json";

/// Pseudo-category written by an earlier release; scrubbed on load
const LEGACY_ALL_ITEMS: &str = "All Items";

/// Durable read/write of the catalog snapshot
pub struct SnapshotStore {
    primary: PathBuf,
    backup: PathBuf,
    temp: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given data folder
    pub fn new(data_dir: &Path) -> Self {
        let primary = data_dir.join(SNAPSHOT_FILE);
        let backup = data_dir.join(format!("{SNAPSHOT_FILE}.backup"));
        let temp = data_dir.join(format!("{SNAPSHOT_FILE}.tmp"));
        Self {
            primary,
            backup,
            temp,
        }
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    /// Load the snapshot from durable storage
    ///
    /// Never raises: parse failures try the backup copy once, and a
    /// failed backup yields the default snapshot (seed categories, seed
    /// items, empty assignment).
    pub fn load(&self) -> Snapshot {
        if !self.primary.exists() {
            tracing::info!(path = %self.primary.display(), "No snapshot file, using defaults");
            return default_snapshot();
        }

        match read_snapshot(&self.primary) {
            Ok(snapshot) => scrub_legacy(snapshot),
            Err(err) => {
                tracing::warn!(
                    path = %self.primary.display(),
                    error = %err,
                    "Snapshot unreadable, trying backup"
                );
                match read_snapshot(&self.backup) {
                    Ok(snapshot) => {
                        tracing::info!(path = %self.backup.display(), "Restored snapshot from backup");
                        scrub_legacy(snapshot)
                    }
                    Err(backup_err) => {
                        tracing::warn!(
                            path = %self.backup.display(),
                            error = %backup_err,
                            "Backup unreadable, using defaults"
                        );
                        default_snapshot()
                    }
                }
            }
        }
    }

    /// Persist the snapshot atomically
    ///
    /// The current primary is copied to the backup location first
    /// (best-effort; a backup failure does not block the save). The new
    /// document is written to a temp file and renamed over the primary,
    /// so the primary is never left partially written. On failure after
    /// the temp write the temp artifact is removed and the error is
    /// propagated; the caller decides whether to retry.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.primary.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Persistence(format!("create data dir failed: {e}")))?;
        }

        if self.primary.exists() {
            if let Err(err) = std::fs::copy(&self.primary, &self.backup) {
                tracing::warn!(error = %err, "Backup copy failed, continuing with save");
            }
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| Error::Persistence(format!("serialize snapshot failed: {e}")))?;

        if let Err(err) = std::fs::write(&self.temp, json) {
            let _ = std::fs::remove_file(&self.temp);
            return Err(Error::Persistence(format!("write temp snapshot failed: {err}")));
        }
        if let Err(err) = std::fs::rename(&self.temp, &self.primary) {
            let _ = std::fs::remove_file(&self.temp);
            return Err(Error::Persistence(format!("replace snapshot failed: {err}")));
        }

        tracing::debug!(path = %self.primary.display(), "Snapshot saved");
        Ok(())
    }
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::CorruptState(format!("read {} failed: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::CorruptState(format!("parse {} failed: {e}", path.display())))
}

fn scrub_legacy(mut snapshot: Snapshot) -> Snapshot {
    snapshot.categories.retain(|c| c != LEGACY_ALL_ITEMS);
    snapshot.assignment.remove(LEGACY_ALL_ITEMS);
    snapshot
}

fn seed_item(id: &str, name: &str, price: f64, image: &str, featured: Option<FeaturedTag>) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        price,
        image: image.to_string(),
        featured,
    }
}

/// Built-in default snapshot used when no durable copy is readable
///
/// Seed categories plus a small starter catalog; the assignment starts
/// empty so the first load triggers a reconciliation pass.
pub fn default_snapshot() -> Snapshot {
    Snapshot {
        items: vec![
            seed_item(
                "seed-1",
                "Classic Denim Jacket",
                89.0,
                "/images/denim-jacket.jpg",
                Some(FeaturedTag::Hot),
            ),
            seed_item(
                "seed-2",
                "Linen Button-Up Shirt",
                65.0,
                "/images/linen-shirt.jpg",
                None,
            ),
            seed_item(
                "seed-3",
                "Leather Ankle Boots",
                120.0,
                "/images/ankle-boots.jpg",
                Some(FeaturedTag::New),
            ),
            seed_item(
                "seed-4",
                "Canvas Sneakers",
                75.0,
                "/images/canvas-sneakers.jpg",
                None,
            ),
            seed_item(
                "seed-5",
                "Iced Matcha Latte",
                6.5,
                "/images/matcha-latte.jpg",
                None,
            ),
            seed_item(
                "seed-6",
                "Sparkling Water",
                3.0,
                "/images/sparkling-water.jpg",
                None,
            ),
            seed_item(
                "seed-7",
                "Chocolate Lava Cake",
                9.5,
                "/images/lava-cake.jpg",
                None,
            ),
        ],
        categories: vec![
            "Apparel".to_string(),
            "Footwear".to_string(),
            "Appetizers".to_string(),
            "Beverages".to_string(),
            "Desserts".to_string(),
        ],
        assignment: Default::default(),
    }
}
