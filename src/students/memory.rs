use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::students::repo::StudentStore;
use crate::students::repo_types::{NewStudent, Student};

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Student>,
}

/// Process-local store. Ids grow monotonically and are never handed out twice,
/// even after a delete.
#[derive(Default)]
pub struct MemoryStudentStore {
    table: RwLock<Table>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn list(&self) -> anyhow::Result<Vec<Student>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Student>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, new: NewStudent) -> anyhow::Result<Student> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let student = new.into_student(table.last_id);
        table.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: i64, fields: NewStudent) -> anyhow::Result<Option<Student>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = fields.into_student(id);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn ann() -> NewStudent {
        NewStudent {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            dob: date!(2000 - 01 - 15),
            amount_due: 0.0,
        }
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let store = MemoryStudentStore::new();
        let a = store.insert(ann()).await.unwrap();
        let b = store.insert(ann()).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStudentStore::new();
        let a = store.insert(ann()).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());
        let b = store.insert(ann()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let store = MemoryStudentStore::new();
        let a = store.insert(ann()).await.unwrap();
        let fields = NewStudent {
            first_name: "Anne".into(),
            amount_due: 50.0,
            ..ann()
        };
        let updated = store.update(a.id, fields).await.unwrap().expect("row exists");
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.first_name, "Anne");
        assert_eq!(updated.amount_due, 50.0);
        assert_eq!(store.get(a.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn missing_ids_are_reported_as_absent() {
        let store = MemoryStudentStore::new();
        assert!(store.get(7).await.unwrap().is_none());
        assert!(store.update(7, ann()).await.unwrap().is_none());
        assert!(!store.delete(7).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
