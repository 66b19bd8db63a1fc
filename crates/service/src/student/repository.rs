use async_trait::async_trait;
use futures_util::TryStreamExt;
use models::{NewStudent, Student, StudentFilter, StudentPatch, StudentSummary};
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{Error as MongoError, ErrorKind},
    Collection, Database,
};

use crate::errors::ServiceError;

/// Documents that fail to decode are a data problem, not a connection problem.
fn store_error(e: MongoError) -> ServiceError {
    match e.kind.as_ref() {
        ErrorKind::BsonDeserialization(_) => ServiceError::Decode(e.to_string()),
        _ => ServiceError::store(e),
    }
}

/// One method per store round-trip. Each call touches at most one document,
/// except `list`.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn insert(&self, student: NewStudent) -> Result<ObjectId, ServiceError>;
    async fn list(&self, filter: &StudentFilter) -> Result<Vec<StudentSummary>, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<Option<Student>, ServiceError>;
    /// Returns whether a document matched the id.
    async fn update(&self, id: ObjectId, patch: &StudentPatch) -> Result<bool, ServiceError>;
    /// Returns whether a document was removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, ServiceError>;
}

/// MongoDB-backed repository implementation.
#[derive(Clone)]
pub struct MongoStudentRepository {
    collection: Collection<Student>,
}

impl MongoStudentRepository {
    pub fn new(collection: Collection<Student>) -> Self { Self { collection } }

    pub fn from_database(db: &Database, collection: &str) -> Self {
        Self::new(models::db::students(db, collection))
    }

    pub fn collection(&self) -> &Collection<Student> { &self.collection }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn insert(&self, student: NewStudent) -> Result<ObjectId, ServiceError> {
        let result = self
            .collection
            .clone_with_type::<NewStudent>()
            .insert_one(student)
            .await
            .map_err(store_error)?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ServiceError::store(format!("unexpected inserted id: {}", result.inserted_id)))
    }

    async fn list(&self, filter: &StudentFilter) -> Result<Vec<StudentSummary>, ServiceError> {
        self.collection
            .clone_with_type::<StudentSummary>()
            .find(filter.to_document())
            .projection(doc! { "name": 1, "age": 1, "_id": 0 })
            .await
            .map_err(store_error)?
            .try_collect()
            .await
            .map_err(store_error)
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Student>, ServiceError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(store_error)
    }

    async fn update(&self, id: ObjectId, patch: &StudentPatch) -> Result<bool, ServiceError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, patch.to_set_document())
            .await
            .map_err(store_error)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(store_error)?;
        Ok(result.deleted_count > 0)
    }
}
