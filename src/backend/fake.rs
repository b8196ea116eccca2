// In-memory backend for provider and diagnostics tests

use super::{BackendError, Collection, ContentBackend, Row, SelectQuery};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Operation kinds recorded by `FakeBackend`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Select,
    Insert,
    DeleteAll,
    Upsert,
}

/// Stores rows per collection and fails on demand
#[derive(Default)]
pub struct FakeBackend {
    tables: Mutex<HashMap<Collection, Vec<Row>>>,
    failures: Mutex<HashSet<(Collection, Op)>>,
    calls: Mutex<Vec<(Collection, Op)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, collection: Collection, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.tables.lock().unwrap().insert(collection, rows);
        self
    }

    pub fn failing(self, collection: Collection, op: Op) -> Self {
        self.failures.lock().unwrap().insert((collection, op));
        self
    }

    pub fn failing_everywhere(self) -> Self {
        {
            let mut failures = self.failures.lock().unwrap();
            for collection in Collection::ALL {
                for op in [Op::Select, Op::Insert, Op::DeleteAll, Op::Upsert] {
                    failures.insert((collection, op));
                }
            }
        }
        self
    }

    pub fn rows(&self, collection: Collection) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<(Collection, Op)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, collection: Collection, op: Op) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push((collection, op));
        if self.failures.lock().unwrap().contains(&(collection, op)) {
            return Err(BackendError::Status {
                status: 503,
                message: format!("{} unavailable", collection),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentBackend for FakeBackend {
    async fn select(
        &self,
        collection: Collection,
        query: &SelectQuery,
    ) -> Result<Vec<Row>, BackendError> {
        self.record(collection, Op::Select)?;
        let mut rows = self.rows(collection);
        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, collection: Collection, rows: &[Value]) -> Result<(), BackendError> {
        self.record(collection, Op::Insert)?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(collection).or_default();
        for row in rows {
            if let Value::Object(map) = row {
                table.push(map.clone());
            }
        }
        Ok(())
    }

    async fn delete_all(&self, collection: Collection) -> Result<(), BackendError> {
        self.record(collection, Op::DeleteAll)?;
        self.tables.lock().unwrap().remove(&collection);
        Ok(())
    }

    async fn upsert(&self, collection: Collection, row: &Value) -> Result<(), BackendError> {
        self.record(collection, Op::Upsert)?;
        let Value::Object(map) = row else {
            return Ok(());
        };
        let key_column = collection.key_column();
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(collection).or_default();
        match table
            .iter_mut()
            .find(|existing| existing.get(key_column) == map.get(key_column))
        {
            Some(existing) => *existing = map.clone(),
            None => table.push(map.clone()),
        }
        Ok(())
    }
}
