//! Dataset domain types

use serde::{Deserialize, Serialize};

use super::job::OpaqueId;

/// Identifier assigned to a dataset by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OpaqueId", into = "String")]
pub struct DatasetId(String);

impl DatasetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<OpaqueId> for DatasetId {
    fn from(id: OpaqueId) -> Self {
        Self(id.into_string())
    }
}

impl From<DatasetId> for String {
    fn from(id: DatasetId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered reference to an uploaded file
///
/// Created once the service accepts an upload; immutable from the client's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub name: String,
    /// Storage location as reported by the service, opaque to the client
    pub file: Option<String>,
}
