//! Unique ID generator.

use uuid::Uuid;

/// Generates unique identifiers for log correlation.
pub struct IdGenerator;

impl IdGenerator {
    /// Generates a unique id for one query execution.
    pub fn execution_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Generates a unique request ID sent along with backend calls.
    pub fn request_id() -> String {
        Uuid::new_v4().to_string()
    }
}
