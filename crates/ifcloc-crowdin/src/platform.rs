use async_trait::async_trait;
use ifcloc_types::{SourceFile, SourceString};

use crate::client::CrowdinClient;
use crate::error::CrowdinError;
use crate::pagination::Page;
use crate::upload::UploadOutcome;

/// Translation-management operations the pipeline depends on
#[async_trait]
pub trait Platform: Send + Sync {
    /// Page size used for list requests
    fn page_size(&self) -> u32;

    /// Files of the configured project
    async fn list_files(&self, page: Page) -> Result<Vec<SourceFile>, CrowdinError>;

    /// Source strings of one file
    async fn list_strings(
        &self,
        file_id: u64,
        page: Page,
    ) -> Result<Vec<SourceString>, CrowdinError>;

    /// Whether a translation exists in the target language
    async fn has_translation(&self, string_id: u64) -> Result<bool, CrowdinError>;

    /// Submit a translation in the target language
    async fn add_translation(
        &self,
        string_id: u64,
        text: &str,
    ) -> Result<UploadOutcome, CrowdinError>;
}

#[async_trait]
impl Platform for CrowdinClient {
    fn page_size(&self) -> u32 {
        CrowdinClient::page_size(self)
    }

    async fn list_files(&self, page: Page) -> Result<Vec<SourceFile>, CrowdinError> {
        self.list_files_page(page).await
    }

    async fn list_strings(
        &self,
        file_id: u64,
        page: Page,
    ) -> Result<Vec<SourceString>, CrowdinError> {
        self.list_strings_page(file_id, page).await
    }

    async fn has_translation(&self, string_id: u64) -> Result<bool, CrowdinError> {
        CrowdinClient::has_translation(self, string_id).await
    }

    async fn add_translation(
        &self,
        string_id: u64,
        text: &str,
    ) -> Result<UploadOutcome, CrowdinError> {
        CrowdinClient::add_translation(self, string_id, text).await
    }
}
