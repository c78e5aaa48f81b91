//! In-memory record store.
//!
//! Keeps every collection as an insertion-ordered list of JSON documents, so
//! one generic implementation serves every [`Record`] type.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::{Record, RecordStore, StoreResult, Table};
use crate::error::StoreError;
use crate::schedule::TimeBlock;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: HashMap<&'static str, Vec<(String, serde_json::Value)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection_mut<T: Record>(&mut self) -> &mut Vec<(String, serde_json::Value)> {
        self.collections.entry(T::KIND).or_default()
    }

    fn encode<T: Record>(item: &T) -> StoreResult<serde_json::Value> {
        serde_json::to_value(item).map_err(|e| StoreError::Corrupt {
            kind: T::KIND,
            id: item.id().to_string(),
            message: e.to_string(),
        })
    }
}

impl<T: Record> Table<T> for MemoryStore {
    fn get_all(&self) -> StoreResult<Vec<T>> {
        let Some(rows) = self.collections.get(T::KIND) else {
            return Ok(Vec::new());
        };
        rows.iter()
            .map(|(id, value)| {
                serde_json::from_value(value.clone()).map_err(|e| StoreError::Corrupt {
                    kind: T::KIND,
                    id: id.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    fn add(&mut self, item: T) -> StoreResult<()> {
        let value = Self::encode(&item)?;
        let rows = self.collection_mut::<T>();
        match rows.iter_mut().find(|(id, _)| id == item.id()) {
            Some(row) => row.1 = value,
            None => rows.push((item.id().to_string(), value)),
        }
        Ok(())
    }

    fn update(&mut self, item: T) -> StoreResult<()> {
        let value = Self::encode(&item)?;
        let row = self
            .collection_mut::<T>()
            .iter_mut()
            .find(|(id, _)| id == item.id())
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: item.id().to_string(),
            })?;
        row.1 = value;
        Ok(())
    }

    fn remove(&mut self, id: &str) -> StoreResult<()> {
        let rows = self.collection_mut::<T>();
        let before = rows.len();
        rows.retain(|(row_id, _)| row_id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn blocks_by_week(&self, week_start: NaiveDate) -> StoreResult<Vec<TimeBlock>> {
        let mut blocks: Vec<TimeBlock> = Table::<TimeBlock>::get_all(self)?
            .into_iter()
            .filter(|b| b.starts_in_week(week_start))
            .collect();
        blocks.sort_by_key(|b| b.start_at);
        Ok(blocks)
    }
}
