use serde::{Deserialize, Serialize};

/// Originator of a message or transcript entry.
///
/// Request messages use `System` and `User`; transcript entries use `User`
/// and `Assistant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}
