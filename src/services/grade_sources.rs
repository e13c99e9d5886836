//! Where the report builder reads grades from.
//!
//! Records are handed over as loose JSON objects: the HTTP source passes
//! through whatever the upstream API returned and the database source
//! serializes its rows into the same shape.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;

use crate::repositories;
use crate::schemas::grade::{ActivityDetail, GradeRecord};
use crate::services::final_report::fields;

#[derive(Debug, Error)]
pub(crate) enum SourceError {
    #[error("student {0} not found")]
    StudentNotFound(i64),
    #[error("database query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub(crate) trait GradeSource: Send + Sync {
    /// Grade log of one student. Fails with `StudentNotFound` for unknown ids.
    async fn student_grades(&self, student_id: i64) -> Result<Vec<Value>, SourceError>;

    /// Every student's grade on one activity.
    async fn activity_grades(&self, activity_id: i64) -> Result<Vec<Value>, SourceError>;

    /// Activity descriptor carrying the weight; `None` when it does not exist.
    async fn activity(&self, activity_id: i64) -> Result<Option<Value>, SourceError>;
}

#[derive(Clone)]
pub(crate) struct PgGradeSource {
    pool: PgPool,
}

impl PgGradeSource {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GradeSource for PgGradeSource {
    async fn student_grades(&self, student_id: i64) -> Result<Vec<Value>, SourceError> {
        if repositories::users::find_role_by_id(&self.pool, student_id).await?.is_none() {
            return Err(SourceError::StudentNotFound(student_id));
        }

        let rows = repositories::grades_log::list_by_student(&self.pool, student_id).await?;
        encode_rows(rows.into_iter().map(GradeRecord::from))
    }

    async fn activity_grades(&self, activity_id: i64) -> Result<Vec<Value>, SourceError> {
        let rows = repositories::grades_log::list_by_activity(&self.pool, activity_id).await?;
        encode_rows(rows.into_iter().map(GradeRecord::from))
    }

    async fn activity(&self, activity_id: i64) -> Result<Option<Value>, SourceError> {
        let activity = repositories::activities::find_by_id(&self.pool, activity_id).await?;
        activity
            .map(|activity| serde_json::to_value(ActivityDetail::from(activity)))
            .transpose()
            .map_err(SourceError::from)
    }
}

fn encode_rows(rows: impl Iterator<Item = GradeRecord>) -> Result<Vec<Value>, SourceError> {
    rows.map(|row| serde_json::to_value(row).map_err(SourceError::from)).collect()
}

/// Reads the public REST endpoints, the way the browser client does.
#[derive(Debug, Clone)]
pub(crate) struct HttpGradeSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGradeSource {
    pub(crate) fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.trim().is_empty()),
        })
    }

    /// `Ok(None)` on 404 so callers decide what "missing" means.
    async fn get_json(&self, path: &str) -> Result<Option<Value>, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SourceError::Status { status: status.as_u16(), url });
        }

        Ok(Some(response.json::<Value>().await?))
    }
}

#[async_trait]
impl GradeSource for HttpGradeSource {
    async fn student_grades(&self, student_id: i64) -> Result<Vec<Value>, SourceError> {
        let body = self
            .get_json(&format!("/grades-log/user/{student_id}"))
            .await?
            .ok_or(SourceError::StudentNotFound(student_id))?;
        Ok(fields::grades_from_body(body))
    }

    async fn activity_grades(&self, activity_id: i64) -> Result<Vec<Value>, SourceError> {
        let body = self.get_json(&format!("/grades-log/activity/{activity_id}")).await?;
        Ok(body.map(fields::grades_from_body).unwrap_or_default())
    }

    async fn activity(&self, activity_id: i64) -> Result<Option<Value>, SourceError> {
        let body = self.get_json(&format!("/activities/activity/{activity_id}")).await?;
        Ok(body.and_then(fields::activity_from_body))
    }
}
