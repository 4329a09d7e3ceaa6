// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded todo store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `todos`: id (u64) → serialized Todo (JSON bytes)
//! - `meta`: key → u64 (the `next_todo_id` counter)
//!
//! Ids are assigned from the counter, starting at 1 and strictly
//! increasing; deleting a todo never recycles its id. Each operation is a
//! single write transaction, so an individual record is updated atomically.
//! Two racing updates to the same id resolve last-write-wins.

use std::path::Path;

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};

use crate::models::Todo;

/// Primary table: todo id → serialized Todo (JSON bytes).
const TODOS: TableDefinition<u64, &[u8]> = TableDefinition::new("todos");

/// Store metadata: key → u64 counter.
const META: TableDefinition<&str, u64> = TableDefinition::new("meta");

const NEXT_ID_KEY: &str = "next_todo_id";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("todo {0} not found")]
    NotFound(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted todo collection.
pub struct TodoStore {
    db: Database,
}

impl TodoStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;

        // Pre-create tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TODOS)?;
            let _ = write_txn.open_table(META)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Create a todo with the next id. The caller has already trimmed and
    /// validated the title.
    pub fn create(&self, title: &str) -> StoreResult<Todo> {
        self.insert_new(title, false)
    }

    fn insert_new(&self, title: &str, is_completed: bool) -> StoreResult<Todo> {
        let write_txn = self.db.begin_write()?;
        let todo = {
            let mut meta = write_txn.open_table(META)?;
            let id = meta.get(NEXT_ID_KEY)?.map(|g| g.value()).unwrap_or(1);
            meta.insert(NEXT_ID_KEY, id + 1)?;

            let todo = Todo {
                id,
                title: title.to_string(),
                is_completed,
                created_at_utc: Utc::now(),
                updated_at_utc: None,
            };

            let json = serde_json::to_vec(&todo)?;
            let mut todos = write_txn.open_table(TODOS)?;
            todos.insert(id, json.as_slice())?;
            todo
        };
        write_txn.commit()?;
        Ok(todo)
    }

    /// Look up a single todo by id.
    pub fn get(&self, id: u64) -> StoreResult<Todo> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TODOS)?;
        match table.get(id)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// All todos ordered by id strictly descending (newest id first).
    pub fn list(&self) -> StoreResult<Vec<Todo>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TODOS)?;

        let mut todos = Vec::new();
        for entry in table.iter()?.rev() {
            let (_, value) = entry?;
            todos.push(serde_json::from_slice(value.value())?);
        }
        Ok(todos)
    }

    /// Overwrite title and completion flag, advancing `updated_at_utc`.
    /// `id` and `created_at_utc` are never touched.
    pub fn update(&self, id: u64, title: &str, is_completed: bool) -> StoreResult<Todo> {
        let write_txn = self.db.begin_write()?;
        let todo = {
            let mut table = write_txn.open_table(TODOS)?;

            let existing_bytes = {
                let existing = table.get(id)?.ok_or(StoreError::NotFound(id))?;
                existing.value().to_vec()
            };

            let mut todo: Todo = serde_json::from_slice(&existing_bytes)?;
            todo.title = title.to_string();
            todo.is_completed = is_completed;
            todo.updated_at_utc = Some(Utc::now());

            let json = serde_json::to_vec(&todo)?;
            table.insert(id, json.as_slice())?;
            todo
        };
        write_txn.commit()?;
        Ok(todo)
    }

    /// Remove a todo permanently.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        let removed;
        {
            let mut table = write_txn.open_table(TODOS)?;
            // Bind before the block ends so the access guard drops first.
            removed = table.remove(id)?.is_some();
        }
        if !removed {
            return Err(StoreError::NotFound(id));
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Delete every todo. The id counter keeps running. Used by the
    /// development-only reset endpoint.
    pub fn clear(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        write_txn.delete_table(TODOS)?;
        {
            let _ = write_txn.open_table(TODOS)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Seed a few starter todos for local development. No-op unless the
    /// table is empty.
    pub fn seed_defaults(&self) -> StoreResult<()> {
        {
            let read_txn = self.db.begin_read()?;
            let table = read_txn.open_table(TODOS)?;
            if table.len()? > 0 {
                return Ok(());
            }
        }

        self.insert_new("Buy milk", false)?;
        self.insert_new("Walk 10k steps", true)?;
        self.insert_new("Ship v1", false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TodoStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let store = TodoStore::open(&dir.path().join("todos.redb")).expect("store opens");
        (store, dir)
    }

    #[test]
    fn create_assigns_increasing_ids_from_one() {
        let (store, _dir) = test_store();
        let first = store.create("first").unwrap();
        let second = store.create("second").unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.is_completed);
        assert!(first.updated_at_utc.is_none());
    }

    #[test]
    fn get_returns_created_record() {
        let (store, _dir) = test_store();
        let created = store.create("Buy milk").unwrap();

        let loaded = store.get(created.id).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn get_missing_id_is_not_found() {
        let (store, _dir) = test_store();
        assert!(matches!(store.get(42), Err(StoreError::NotFound(42))));
    }

    #[test]
    fn list_orders_by_id_descending() {
        let (store, _dir) = test_store();
        for title in ["a", "b", "c"] {
            store.create(title).unwrap();
        }

        let todos = store.list().unwrap();
        let ids: Vec<u64> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn update_sets_updated_at_and_preserves_created_at() {
        let (store, _dir) = test_store();
        let created = store.create("Buy milk").unwrap();

        let updated = store.update(created.id, "Buy milk", true).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at_utc, created.created_at_utc);
        assert!(updated.is_completed);
        let first_update = updated.updated_at_utc.expect("updated_at set");
        assert!(first_update >= created.created_at_utc);

        let again = store.update(created.id, "Buy oat milk", true).unwrap();
        assert_eq!(again.title, "Buy oat milk");
        assert!(again.updated_at_utc.unwrap() >= first_update);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let (store, _dir) = test_store();
        assert!(matches!(
            store.update(9, "x", false),
            Err(StoreError::NotFound(9))
        ));
    }

    #[test]
    fn delete_removes_record() {
        let (store, _dir) = test_store();
        let created = store.create("gone soon").unwrap();

        store.delete(created.id).unwrap();
        assert!(matches!(
            store.get(created.id),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(created.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn deleted_ids_are_not_recycled() {
        let (store, _dir) = test_store();
        let first = store.create("one").unwrap();
        store.delete(first.id).unwrap();

        let second = store.create("two").unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn clear_empties_the_table() {
        let (store, _dir) = test_store();
        store.create("a").unwrap();
        store.create("b").unwrap();

        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());

        // Counter keeps running after a reset.
        let next = store.create("c").unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn seed_defaults_only_fills_an_empty_table() {
        let (store, _dir) = test_store();
        store.seed_defaults().unwrap();

        let todos = store.list().unwrap();
        assert_eq!(todos.len(), 3);
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Ship v1", "Walk 10k steps", "Buy milk"]);
        assert!(todos.iter().any(|t| t.is_completed));

        store.seed_defaults().unwrap();
        assert_eq!(store.list().unwrap().len(), 3);
    }

    #[test]
    fn open_surfaces_unusable_parent_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = TodoStore::open(&blocker.join("sub").join("todos.redb"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.redb");

        let created = {
            let store = TodoStore::open(&path).unwrap();
            store.create("persisted").unwrap()
        };

        let store = TodoStore::open(&path).unwrap();
        let loaded = store.get(created.id).unwrap();
        assert_eq!(loaded, created);

        // Counter also persists.
        let next = store.create("another").unwrap();
        assert_eq!(next.id, created.id + 1);
    }
}
