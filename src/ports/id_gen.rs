//! ID generator port for log entry identifiers.

/// Generates unique identifiers.
///
/// Uniqueness within one log collection is the only guarantee callers rely on.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
