//! Dataset DTOs

use serde::Deserialize;

use crate::domain::dataset::{Dataset, DatasetId};

/// A user-selected file to upload
///
/// Content is forwarded as-is; restricting accepted types is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

/// Response body of `POST /datasets/`
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetCreated {
    pub id: DatasetId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

impl DatasetCreated {
    /// Builds the domain dataset, falling back to the uploaded name
    pub fn into_dataset(self, uploaded_name: &str) -> Dataset {
        Dataset {
            id: self.id,
            name: self.name.unwrap_or_else(|| uploaded_name.to_string()),
            file: self.file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_created_requires_id() {
        assert!(serde_json::from_str::<DatasetCreated>(r#"{"name": "a.csv"}"#).is_err());

        let created: DatasetCreated =
            serde_json::from_str(r#"{"id": 5, "file": "/media/datasets/a.csv"}"#).unwrap();
        let dataset = created.into_dataset("a.csv");
        assert_eq!(dataset.id.as_str(), "5");
        assert_eq!(dataset.name, "a.csv");
        assert_eq!(dataset.file.as_deref(), Some("/media/datasets/a.csv"));
    }

    #[test]
    fn test_upload_file_extension() {
        assert_eq!(
            UploadFile::new("Sales.XLSX", Vec::<u8>::new()).extension().as_deref(),
            Some("xlsx")
        );
        assert_eq!(UploadFile::new("README", Vec::<u8>::new()).extension(), None);
    }
}
