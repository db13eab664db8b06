//! redb-backed session store.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};

use crate::error::SessionStoreError;

const TABLE: TableDefinition<&str, &str> = TableDefinition::new("session");

/// Well-known session keys.
pub mod keys {
    /// Bearer token returned by login.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Durable user id resolved from the token after login.
    pub const USER_ID: &str = "user_id";
    /// Id of the group the planner screen operates on.
    pub const GROUP_ID: &str = "group_id";
    /// Display name captured at registration, consumed by the first login.
    pub const PENDING_NAME: &str = "pending_name";
}

/// Snapshot of the persisted session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub active_group_id: Option<String>,
    pub pending_display_name: Option<String>,
}

impl Session {
    /// True when both credentials a signed-in screen needs are present.
    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some() && self.user_id.is_some()
    }
}

/// Durable key/value store for the session, one table in a redb database.
///
/// Each mutation runs in its own write transaction; once a call returns,
/// the value survives process restart. There is no expiry or token
/// freshness check here; an expired token simply makes a later gateway
/// call fail with an auth error.
pub struct SessionStore {
    db: Database,
}

impl SessionStore {
    /// Open or create the session database at the given path.
    pub fn open(path: &Path) -> Result<Self, SessionStoreError> {
        let db = Database::create(path).map_err(|e| SessionStoreError::Storage(e.to_string()))?;

        // Ensure the table exists so first reads don't fail.
        let write_txn = db
            .begin_write()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;

        Ok(Self { db })
    }

    /// Read one value.
    pub fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;

        match table.get(key) {
            Ok(Some(value)) => Ok(Some(value.value().to_string())),
            Ok(None) => Ok(None),
            Err(e) => Err(SessionStoreError::Storage(e.to_string())),
        }
    }

    /// Write one value, committing before returning.
    pub fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Remove one key if present.
    pub fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Remove every key. Called on logout.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| SessionStoreError::Storage(e.to_string()))?;

            let all_keys: Vec<String> = {
                let iter = table
                    .iter()
                    .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
                let mut collected = Vec::new();
                for entry in iter {
                    let (key, _value) =
                        entry.map_err(|e| SessionStoreError::Storage(e.to_string()))?;
                    collected.push(key.value().to_string());
                }
                collected
            };

            for key in all_keys {
                table
                    .remove(key.as_str())
                    .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
            }
        }
        write_txn
            .commit()
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;

        tracing::debug!("Session store cleared");
        Ok(())
    }

    /// Read all well-known keys into a [`Session`] snapshot.
    pub fn snapshot(&self) -> Result<Session, SessionStoreError> {
        Ok(Session {
            access_token: self.get(keys::ACCESS_TOKEN)?,
            user_id: self.get(keys::USER_ID)?,
            active_group_id: self.get(keys::GROUP_ID)?,
            pending_display_name: self.get(keys::PENDING_NAME)?,
        })
    }

    // ---- typed accessors ----

    pub fn access_token(&self) -> Result<Option<String>, SessionStoreError> {
        self.get(keys::ACCESS_TOKEN)
    }

    pub fn set_access_token(&self, token: &str) -> Result<(), SessionStoreError> {
        self.set(keys::ACCESS_TOKEN, token)
    }

    pub fn user_id(&self) -> Result<Option<String>, SessionStoreError> {
        self.get(keys::USER_ID)
    }

    pub fn set_user_id(&self, user_id: &str) -> Result<(), SessionStoreError> {
        self.set(keys::USER_ID, user_id)
    }

    pub fn active_group_id(&self) -> Result<Option<String>, SessionStoreError> {
        self.get(keys::GROUP_ID)
    }

    pub fn set_active_group_id(&self, group_id: &str) -> Result<(), SessionStoreError> {
        self.set(keys::GROUP_ID, group_id)
    }

    pub fn pending_display_name(&self) -> Result<Option<String>, SessionStoreError> {
        self.get(keys::PENDING_NAME)
    }

    pub fn set_pending_display_name(&self, name: &str) -> Result<(), SessionStoreError> {
        self.set(keys::PENDING_NAME, name)
    }

    pub fn clear_pending_display_name(&self) -> Result<(), SessionStoreError> {
        self.remove(keys::PENDING_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(&dir.path().join("session.redb")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_round_trip() {
        let (_dir, store) = open_temp();

        assert_eq!(store.get(keys::ACCESS_TOKEN).unwrap(), None);
        store.set(keys::ACCESS_TOKEN, "tok-1").unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).unwrap(),
            Some("tok-1".to_string())
        );

        store.set(keys::ACCESS_TOKEN, "tok-2").unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).unwrap(),
            Some("tok-2".to_string())
        );
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.redb");

        {
            let store = SessionStore::open(&path).unwrap();
            store.set_access_token("tok").unwrap();
            store.set_user_id("u-1").unwrap();
        }

        let store = SessionStore::open(&path).unwrap();
        let session = store.snapshot().unwrap();
        assert_eq!(session.access_token.as_deref(), Some("tok"));
        assert_eq!(session.user_id.as_deref(), Some("u-1"));
        assert!(session.is_signed_in());
    }

    #[test]
    fn test_clear_removes_everything() {
        let (_dir, store) = open_temp();

        store.set_access_token("tok").unwrap();
        store.set_user_id("u-1").unwrap();
        store.set_active_group_id("g-1").unwrap();
        store.set_pending_display_name("Ada").unwrap();

        store.clear().unwrap();

        let session = store.snapshot().unwrap();
        assert_eq!(session, Session::default());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_remove_single_key() {
        let (_dir, store) = open_temp();

        store.set_pending_display_name("Ada").unwrap();
        store.clear_pending_display_name().unwrap();
        assert_eq!(store.pending_display_name().unwrap(), None);

        // Removing an absent key is not an error.
        store.clear_pending_display_name().unwrap();
    }
}
