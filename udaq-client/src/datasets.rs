//! Dataset-related API endpoints

use reqwest::multipart::{Form, Part};
use tracing::debug;
use udaq_core::domain::dataset::Dataset;
use udaq_core::dto::dataset::{DatasetCreated, UploadFile};

use crate::ServiceClient;
use crate::error::{ClientError, Result};

impl ServiceClient {
    /// Register an uploaded file as a dataset
    ///
    /// Sends a multipart body with the `file` payload and its `name`. The
    /// response must carry an `id`; anything else is a parse error.
    ///
    /// # Arguments
    /// * `file` - The file to upload; content is forwarded untouched
    ///
    /// # Returns
    /// The registered dataset
    pub async fn register_dataset(&self, file: &UploadFile) -> Result<Dataset> {
        let url = self.api_url("datasets/");

        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str("application/octet-stream")
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid file part: {}", e)))?;
        let form = Form::new()
            .part("file", part)
            .text("name", file.name.clone());

        debug!(
            "Uploading dataset {} ({} bytes)",
            file.name,
            file.content.len()
        );
        let response = self.client.post(&url).multipart(form).send().await?;

        let created: DatasetCreated = self.handle_response(response).await?;
        Ok(created.into_dataset(&file.name))
    }
}
