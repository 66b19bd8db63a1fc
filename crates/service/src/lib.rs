//! Service layer for student records.
//! - `StudentRepository` is the seam over the document store.
//! - `StudentService` owns input parsing (ids, filters, patches) and maps
//!   store outcomes to `ServiceError`.

pub mod errors;
pub mod student;
#[cfg(test)]
pub mod test_support;

pub use student::{
    memory::InMemoryStudentRepository,
    repository::{MongoStudentRepository, StudentRepository},
    service::StudentService,
};
