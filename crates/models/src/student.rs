use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub country: String,
}

/// Stored student document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub age: i32,
    pub address: Address,
}

/// Creation payload; every field is mandatory and `_id` is left to the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
    pub address: Address,
}

/// Projection returned by list queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub name: String,
    pub age: i32,
}

impl NewStudent {
    pub fn with_id(self, id: ObjectId) -> Student {
        Student { id, name: self.name, age: self.age, address: self.address }
    }
}

impl From<&Student> for StudentSummary {
    fn from(s: &Student) -> Self {
        Self { name: s.name.clone(), age: s.age }
    }
}

/// Parse a 24-char hex identifier. A malformed id is a client error, never a miss.
pub fn parse_id(raw: &str) -> Result<ObjectId, ModelError> {
    ObjectId::parse_str(raw).map_err(|_| ModelError::InvalidId(raw.to_string()))
}
