use mongodb::bson::{doc, Document};

use crate::errors::ModelError;
use crate::student::Student;

/// List constraints. `None` means no constraint at all, never a match on an
/// empty or zero value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub country: Option<String>,
    pub min_age: Option<i32>,
}

impl StudentFilter {
    /// Build from raw query parameters; empty strings are treated as absent.
    pub fn from_params(country: Option<&str>, age: Option<&str>) -> Result<Self, ModelError> {
        let country = country.filter(|c| !c.is_empty()).map(str::to_string);
        let min_age = match age.map(str::trim).filter(|a| !a.is_empty()) {
            Some(a) => Some(
                a.parse::<i32>()
                    .map_err(|_| ModelError::Validation(format!("age must be an integer, got {a:?}")))?,
            ),
            None => None,
        };
        Ok(Self { country, min_age })
    }

    /// Query document for the store; both constraints combine with AND.
    pub fn to_document(&self) -> Document {
        let mut query = Document::new();
        if let Some(country) = &self.country {
            query.insert("address.country", country.as_str());
        }
        if let Some(min_age) = self.min_age {
            query.insert("age", doc! { "$gte": min_age });
        }
        query
    }

    pub fn matches(&self, student: &Student) -> bool {
        let country_ok = self
            .country
            .as_ref()
            .map_or(true, |c| student.address.country == *c);
        let age_ok = self.min_age.map_or(true, |min| student.age >= min);
        country_ok && age_ok
    }
}
