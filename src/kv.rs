// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable string-to-string storage. Writes are independent per key unless an
/// implementation overrides [`KvStore::set_all`].
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Writes the pairs in order. The default stops at the first failure and
    /// leaves earlier writes in place.
    fn set_all(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn set_all(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_all(pairs)
    }
}

/// Key-value table inside the SQLite database.
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    pub fn new(conn: Connection) -> Result<Self, StorageError> {
        crate::db::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn upsert(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        upsert(&self.conn, key, value)?;
        Ok(())
    }

    // One transaction, so a reading never lands without its history.
    fn set_all(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in pairs {
            upsert(&tx, key, value)?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryKv {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_kv_upserts_values() {
        let kv = SqliteKv::in_memory().unwrap();
        assert_eq!(kv.get("elec_prev").unwrap(), None);
        kv.set("elec_prev", "10").unwrap();
        kv.set("elec_prev", "12.5").unwrap();
        assert_eq!(kv.get("elec_prev").unwrap().as_deref(), Some("12.5"));

        let n: i64 = kv
            .connection()
            .query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn sqlite_kv_set_all_commits_every_pair() {
        let kv = SqliteKv::in_memory().unwrap();
        kv.set_all(&[("water_prev", "3"), ("water_hist", "[]")])
            .unwrap();
        assert_eq!(kv.get("water_prev").unwrap().as_deref(), Some("3"));
        assert_eq!(kv.get("water_hist").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn memory_kv_round_trips() {
        let kv = MemoryKv::new();
        assert!(kv.is_empty());
        kv.set_all(&[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(kv.len(), 2);
        assert_eq!(kv.get("b").unwrap().as_deref(), Some("2"));
    }
}
