use std::sync::OnceLock;

use ifcloc_config::crowdin::{CrowdinConfig, UploadBody};
use ifcloc_types::{LanguageCode, Project, SourceFile, SourceString, TranslationRecord};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::CrowdinError;
use crate::pagination::{Page, Paginator};
use crate::upload::{Attempt, BodyShape, RejectedAttempt, TranslationPayload, UploadOutcome};

/// Crowdin API v2 client bound to one project and one target language
pub struct CrowdinClient {
    base_url: String,
    token: String,
    project_id: Option<u64>,
    language: LanguageCode,
    page_size: u32,
    upload_body: UploadBody,
    /// Shape learned from the first accepted upload in `auto` mode
    probed_shape: OnceLock<BodyShape>,
    client: reqwest::Client,
}

impl CrowdinClient {
    pub fn new(config: &CrowdinConfig, language: impl Into<LanguageCode>) -> Self {
        Self {
            base_url: config.base_url(),
            token: config.token.clone(),
            project_id: config.project_id,
            language: language.into(),
            page_size: config.page_size,
            upload_body: config.upload_body,
            probed_shape: OnceLock::new(),
            client: reqwest::Client::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Shape used for uploads, if already known
    pub fn upload_shape(&self) -> Option<BodyShape> {
        match self.upload_body {
            UploadBody::Plain => Some(BodyShape::Plain),
            UploadBody::Wrapped => Some(BodyShape::Wrapped),
            UploadBody::Auto => self.probed_shape.get().copied(),
        }
    }

    pub async fn list_projects_page(&self, page: Page) -> Result<Vec<Project>, CrowdinError> {
        self.get_list("/projects", &page_query(page)).await
    }

    /// Every project visible to the token
    pub async fn list_projects(&self) -> Result<Vec<Project>, CrowdinError> {
        Paginator::new(self.page_size, |page| self.list_projects_page(page))
            .collect_all()
            .await
    }

    pub async fn list_files_page(&self, page: Page) -> Result<Vec<SourceFile>, CrowdinError> {
        let path = self.project_path("list files")?;
        self.get_list(&format!("{path}/files"), &page_query(page))
            .await
    }

    pub async fn list_strings_page(
        &self,
        file_id: u64,
        page: Page,
    ) -> Result<Vec<SourceString>, CrowdinError> {
        let path = self.project_path("list strings")?;
        let mut query = page_query(page);
        query.push(("fileId", file_id.to_string()));

        self.get_list(&format!("{path}/strings"), &query).await
    }

    /// Whether `string_id` has at least one translation in the target language
    pub async fn has_translation(&self, string_id: u64) -> Result<bool, CrowdinError> {
        let path = self.project_path("check translations")?;
        let query = [
            ("stringIds", string_id.to_string()),
            ("limit", "1".to_string()),
        ];

        let existing: Vec<TranslationRecord> = self
            .get_list(
                &format!("{path}/languages/{}/translations", self.language),
                &query,
            )
            .await?;

        Ok(!existing.is_empty())
    }

    /// Add an unapproved translation.
    ///
    /// With a known shape a single request is sent. Otherwise this call is the
    /// probe: plain first, then wrapped, and the first shape the server
    /// understands (success or conflict) is kept for the rest of the run.
    pub async fn add_translation(
        &self,
        string_id: u64,
        text: &str,
    ) -> Result<UploadOutcome, CrowdinError> {
        let path = self.project_path("upload translations")?;
        let url = format!("{}{path}/translations", self.base_url);
        let payload = TranslationPayload {
            string_id,
            language_id: &self.language,
            text,
        };

        if let Some(shape) = self.upload_shape() {
            let outcome = match self.post_translation(&url, shape, &payload).await? {
                Attempt::Accepted => UploadOutcome::Created,
                Attempt::Conflict => UploadOutcome::AlreadyExists,
                Attempt::Rejected(rejected) => UploadOutcome::Rejected(vec![rejected]),
            };
            return Ok(outcome);
        }

        let mut rejected = Vec::new();
        for shape in [BodyShape::Plain, BodyShape::Wrapped] {
            match self.post_translation(&url, shape, &payload).await? {
                Attempt::Accepted => {
                    self.remember_shape(shape);
                    return Ok(UploadOutcome::Created);
                }
                Attempt::Conflict => {
                    self.remember_shape(shape);
                    return Ok(UploadOutcome::AlreadyExists);
                }
                Attempt::Rejected(attempt) => {
                    tracing::debug!("Upload with {} body refused: {}", shape, attempt.status);
                    rejected.push(attempt);
                }
            }
        }

        Ok(UploadOutcome::Rejected(rejected))
    }

    fn remember_shape(&self, shape: BodyShape) {
        if self.probed_shape.set(shape).is_ok() {
            tracing::info!("Upload endpoint accepts {} request bodies", shape);
        }
    }

    async fn post_translation(
        &self,
        url: &str,
        shape: BodyShape,
        payload: &TranslationPayload<'_>,
    ) -> Result<Attempt, CrowdinError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&shape.body(payload))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Attempt::Accepted);
        }
        if status == reqwest::StatusCode::CONFLICT {
            return Ok(Attempt::Conflict);
        }

        let body = response.text().await.unwrap_or_default();
        Ok(Attempt::Rejected(RejectedAttempt {
            shape,
            status: status.as_u16(),
            body,
        }))
    }

    fn project_path(&self, action: &'static str) -> Result<String, CrowdinError> {
        self.project_id
            .map(|id| format!("/projects/{id}"))
            .ok_or(CrowdinError::NoProject(action))
    }

    /// GET a list endpoint and unwrap its `{"data": [{"data": ..}]}` envelope
    async fn get_list<T>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>, CrowdinError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}{} {:?}", self.base_url, path, query);

        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrowdinError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let list: ListResponse<T> = response.json().await?;
        Ok(list.data.into_iter().map(|item| item.data).collect())
    }
}

fn page_query(page: Page) -> Vec<(&'static str, String)> {
    vec![
        ("limit", page.limit.to_string()),
        ("offset", page.offset.to_string()),
    ]
}

#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<Envelope<T>>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}
