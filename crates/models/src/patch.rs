use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use mongodb::bson::{doc, Bson, Document};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::student::{Address, Student};

/// Top-level fields a partial update may touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudentField {
    Name,
    Age,
    Address,
}

impl StudentField {
    pub const ALL: [StudentField; 3] = [Self::Name, Self::Age, Self::Address];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for StudentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ModelError::Validation(format!("unknown field: {s}")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Name(String),
    Age(i32),
    Address(Address),
}

impl FieldValue {
    /// Type-check a raw JSON value against the target field.
    pub fn parse(field: StudentField, value: Value) -> Result<Self, ModelError> {
        let invalid = |e: serde_json::Error| ModelError::Validation(format!("{field}: {e}"));
        match field {
            StudentField::Name => serde_json::from_value(value).map(Self::Name).map_err(invalid),
            StudentField::Age => serde_json::from_value(value).map(Self::Age).map_err(invalid),
            StudentField::Address => serde_json::from_value(value).map(Self::Address).map_err(invalid),
        }
    }

    fn to_bson(&self) -> Bson {
        match self {
            Self::Name(name) => Bson::String(name.clone()),
            Self::Age(age) => Bson::Int32(*age),
            Self::Address(a) => Bson::Document(doc! { "city": a.city.as_str(), "country": a.country.as_str() }),
        }
    }
}

/// A validated, non-empty set of top-level field replacements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentPatch {
    fields: BTreeMap<StudentField, FieldValue>,
}

impl StudentPatch {
    /// Validate an arbitrary JSON object. Unknown keys and mistyped values are
    /// rejected; an empty object is reported separately as `EmptyUpdate`.
    pub fn from_json(body: Map<String, Value>) -> Result<Self, ModelError> {
        if body.is_empty() {
            return Err(ModelError::EmptyUpdate);
        }
        let mut fields = BTreeMap::new();
        for (key, value) in body {
            let field: StudentField = key.parse()?;
            fields.insert(field, FieldValue::parse(field, value)?);
        }
        Ok(Self { fields })
    }

    /// Number of fields touched; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `$set` document touching only the named fields.
    pub fn to_set_document(&self) -> Document {
        let set: Document = self
            .fields
            .iter()
            .map(|(field, value)| (field.as_str().to_string(), value.to_bson()))
            .collect();
        doc! { "$set": set }
    }

    pub fn apply_to(&self, student: &mut Student) {
        for value in self.fields.values() {
            match value {
                FieldValue::Name(name) => student.name = name.clone(),
                FieldValue::Age(age) => student.age = *age,
                FieldValue::Address(address) => student.address = address.clone(),
            }
        }
    }
}
