#![cfg(test)]
use std::sync::Arc;

use models::{Address, NewStudent};
use serde_json::{Map, Value};

use crate::{InMemoryStudentRepository, MongoStudentRepository, StudentRepository, StudentService};

pub fn in_memory_service() -> StudentService {
    let repo: Arc<dyn StudentRepository> = Arc::new(InMemoryStudentRepository::new());
    StudentService::new(repo)
}

pub fn ann() -> NewStudent {
    NewStudent {
        name: "Ann".into(),
        age: 21,
        address: Address { city: "Lima".into(), country: "Peru".into() },
    }
}

pub fn as_object(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A repository on a throwaway collection, or `None` when no MongoDB is configured.
pub async fn mongo_repository() -> Option<MongoStudentRepository> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("MONGODB_URL").is_err() {
        return None;
    }
    let cfg = configs::DatabaseConfig {
        url: std::env::var("MONGODB_URL").ok()?,
        name: "student_records_test".into(),
        server_selection_timeout_secs: 3,
        ..Default::default()
    };
    let db = match models::db::connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to mongodb: {}", e);
            return None;
        }
    };
    let collection = format!("students_{}", uuid::Uuid::new_v4().simple());
    Some(MongoStudentRepository::from_database(&db, &collection))
}
