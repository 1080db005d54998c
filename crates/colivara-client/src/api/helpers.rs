//! File conversion helpers.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::client::ColivaraClient;
use crate::error::{Error, Result};
use crate::types::FileOut;

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// File helper API client.
pub struct HelpersApi {
    client: ColivaraClient,
}

impl HelpersApi {
    pub(crate) fn new(client: ColivaraClient) -> Self {
        Self { client }
    }

    /// Convert a local file into one base64 image per page.
    pub async fn file_to_img_base64(&self, path: &Path) -> Result<Vec<FileOut>> {
        let display = path.display().to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::from_io(&display, e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        self.file_bytes_to_img_base64(bytes, file_name).await
    }

    /// Convert in-memory file bytes into one base64 image per page.
    pub async fn file_bytes_to_img_base64(
        &self,
        bytes: Vec<u8>,
        file_name: impl Into<String>,
    ) -> Result<Vec<FileOut>> {
        let form = Form::new().part(FILE_FIELD, Part::bytes(bytes).file_name(file_name.into()));
        self.client
            .post_multipart("helpers/file-to-imgbase64/", form)
            .await
    }
}
