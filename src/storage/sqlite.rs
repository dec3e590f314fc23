//! SQLite-backed key-value slots
//!
//! All slots live in one `kv` table. Every write takes the next value of a
//! database-wide revision counter, so a slot that is removed and written
//! again never reuses a revision another process has already seen.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;

use super::{KeyValueStore, StorageEvent, StorageSubscription, WatcherHandle, event_channel};
use crate::error::StorageError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

type Result<T> = std::result::Result<T, StorageError>;

/// Slot revisions as last observed by this connection
type Revisions = HashMap<String, i64>;

struct Inner {
    conn: Connection,
    data_version: i64,
    revisions: Revisions,
}

/// SQLite-backed key-value store
pub struct SqliteStore {
    inner: Mutex<Inner>,
    path: PathBuf,
    events: broadcast::Sender<StorageEvent>,
}

impl SqliteStore {
    /// Default database path (~/.local/share/shopkeep/session.db on Linux)
    pub fn default_path() -> Result<PathBuf> {
        let data_base = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Ok(data_base.join("shopkeep").join("session.db"))
    }

    /// Open or create the store at a specific file
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::Io(format!("Failed to create data dir: {}", e)))?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Session store schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            conn.execute_batch("DROP TABLE IF EXISTS kv; DROP TABLE IF EXISTS meta;")?;
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                revision INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS meta (
                name TEXT PRIMARY KEY NOT NULL,
                value INTEGER NOT NULL
            );

            INSERT OR IGNORE INTO meta (name, value) VALUES ('revision', 0);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(meta) = std::fs::metadata(path) {
                let mut perms = meta.permissions();
                perms.set_mode(0o600);
                if let Err(e) = std::fs::set_permissions(path, perms) {
                    log::warn!("Failed to restrict permissions on {}: {}", path.display(), e);
                }
            }
        }

        let data_version = read_data_version(&conn)?;
        let revisions = load_revisions(&conn)?;

        Ok(Self {
            inner: Mutex::new(Inner {
                conn,
                data_version,
                revisions,
            }),
            path: path.to_path_buf(),
            events: event_channel(),
        })
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Detect slots changed by other connections since the last poll.
    ///
    /// Broadcasts one event per changed slot and returns how many there were.
    /// This connection's own writes never show up here.
    pub fn poll_changes(&self) -> Result<usize> {
        let changed = {
            let mut inner = self.lock()?;
            let version = read_data_version(&inner.conn)?;
            if version == inner.data_version {
                return Ok(0);
            }
            inner.data_version = version;

            let current = load_revisions(&inner.conn)?;
            let changed = diff_revisions(&inner.revisions, &current);
            inner.revisions = current;
            changed
        };

        for key in &changed {
            log::debug!("Slot {} changed in another process", key);
            // No receivers is fine
            let _ = self.events.send(StorageEvent { key: key.clone() });
        }

        Ok(changed.len())
    }

    /// Poll for external changes on a fixed interval until the handle drops
    pub fn spawn_watcher(self: &Arc<Self>, interval: Duration) -> WatcherHandle {
        let store = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = store.poll_changes() {
                    log::warn!("Failed to poll session store for changes: {}", e);
                }
            }
        });
        WatcherHandle::new(task)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.lock()?;
        let value = inner
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.lock()?;
        let now = Utc::now().timestamp();

        let tx = inner.conn.transaction()?;
        tx.execute(
            "UPDATE meta SET value = value + 1 WHERE name = 'revision'",
            [],
        )?;
        let revision: i64 = tx.query_row(
            "SELECT value FROM meta WHERE name = 'revision'",
            [],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO kv (key, value, revision, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                revision = excluded.revision,
                updated_at = excluded.updated_at",
            params![key, value, revision, now],
        )?;
        tx.commit()?;

        inner.revisions.insert(key.to_string(), revision);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.lock()?;
        inner.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        inner.revisions.remove(key);
        Ok(())
    }

    fn subscribe(&self) -> StorageSubscription {
        StorageSubscription::new(self.events.subscribe())
    }
}

fn read_data_version(conn: &Connection) -> Result<i64> {
    Ok(conn.pragma_query_value(None, "data_version", |r| r.get(0))?)
}

fn load_revisions(conn: &Connection) -> Result<Revisions> {
    let mut stmt = conn.prepare("SELECT key, revision FROM kv")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

    let mut revisions = Revisions::new();
    for row in rows {
        let (key, revision) = row?;
        revisions.insert(key, revision);
    }
    Ok(revisions)
}

/// Keys whose revision differs between two snapshots, removals included
fn diff_revisions(before: &Revisions, after: &Revisions) -> Vec<String> {
    let mut changed: Vec<String> = after
        .iter()
        .filter(|(key, revision)| before.get(*key) != Some(*revision))
        .map(|(key, _)| key.clone())
        .collect();

    changed.extend(
        before
            .keys()
            .filter(|key| !after.contains_key(*key))
            .cloned(),
    );

    changed.sort();
    changed
}
