//! Student domain types and the MongoDB connection helper.
//!
//! Documents are stored in a single collection; `_id` is a native `ObjectId`
//! and is rendered as a hex string only at the HTTP boundary.

pub mod errors;
pub mod db;
pub mod student;
pub mod filter;
pub mod patch;

pub use filter::StudentFilter;
pub use patch::{FieldValue, StudentField, StudentPatch};
pub use student::{parse_id, Address, NewStudent, Student, StudentSummary};
