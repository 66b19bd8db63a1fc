use std::sync::Arc;

use models::{parse_id, NewStudent, Student, StudentFilter, StudentPatch, StudentSummary};
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use super::repository::StudentRepository;
use crate::errors::ServiceError;

/// Application service for student records. Holds no record state; every
/// call is one repository round-trip after input parsing.
pub struct StudentService<R: StudentRepository + ?Sized = dyn StudentRepository> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> Clone for StudentService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewStudent) -> Result<ObjectId, ServiceError> {
        let id = self.repo.insert(input).await?;
        info!(id = %id, "student_created");
        Ok(id)
    }

    /// Raw query values are normalized here: empty strings mean "no filter".
    #[instrument(skip(self))]
    pub async fn list(&self, country: Option<&str>, age: Option<&str>) -> Result<Vec<StudentSummary>, ServiceError> {
        let filter = StudentFilter::from_params(country, age)?;
        let students = self.repo.list(&filter).await?;
        debug!(count = students.len(), "students_listed");
        Ok(students)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Student, ServiceError> {
        let oid = parse_id(id)?;
        self.repo
            .get(oid)
            .await?
            .ok_or_else(|| ServiceError::not_found("student"))
    }

    /// An empty body is rejected before the id is looked at.
    #[instrument(skip(self, body))]
    pub async fn update(&self, id: &str, body: Map<String, Value>) -> Result<(), ServiceError> {
        let patch = StudentPatch::from_json(body)?;
        let oid = parse_id(id)?;
        if !self.repo.update(oid, &patch).await? {
            return Err(ServiceError::not_found("student"));
        }
        info!(id = %oid, fields = patch.len(), "student_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let oid = parse_id(id)?;
        if !self.repo.delete(oid).await? {
            return Err(ServiceError::not_found("student"));
        }
        info!(id = %oid, "student_deleted");
        Ok(())
    }
}
