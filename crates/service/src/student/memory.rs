use std::collections::BTreeMap;

use async_trait::async_trait;
use models::{NewStudent, Student, StudentFilter, StudentPatch, StudentSummary};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::repository::StudentRepository;
use crate::errors::ServiceError;

/// Process-local store with the same filter and `$set` semantics as the
/// MongoDB repository. Nothing is persisted; records vanish with the process.
///
/// Keyed by `ObjectId`, whose timestamp prefix gives roughly insertion order.
#[derive(Default)]
pub struct InMemoryStudentRepository {
    inner: RwLock<BTreeMap<ObjectId, Student>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(&self, student: NewStudent) -> Result<ObjectId, ServiceError> {
        let id = ObjectId::new();
        let mut map = self.inner.write().await;
        map.insert(id, student.with_id(id));
        Ok(id)
    }

    async fn list(&self, filter: &StudentFilter) -> Result<Vec<StudentSummary>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.values().filter(|s| filter.matches(s)).map(StudentSummary::from).collect())
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Student>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(&id).cloned())
    }

    async fn update(&self, id: ObjectId, patch: &StudentPatch) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        match map.get_mut(&id) {
            Some(existing) => {
                patch.apply_to(existing);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.remove(&id).is_some())
    }
}
