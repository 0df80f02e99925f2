use crate::config::SupabaseConfig;
use crate::error::TriageError;
use crate::models::PatientRow;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;

#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Insert all rows in one request, returning how many were written.
    async fn insert_patients(&self, rows: &[PatientRow]) -> Result<usize, TriageError>;
}

/// PostgREST table endpoint of the Supabase project.
pub struct SupabaseStore {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseStore {
    pub fn new(client: Client, config: SupabaseConfig) -> Self {
        Self { client, config }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.url.trim_end_matches('/'),
            self.config.patients_table
        )
    }
}

#[async_trait]
impl PatientStore for SupabaseStore {
    async fn insert_patients(&self, rows: &[PatientRow]) -> Result<usize, TriageError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let key = self.config.service_key.expose_secret();

        let response = self
            .client
            .post(self.table_url())
            .bearer_auth(key)
            .header("apikey", key)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await
            .map_err(|e| TriageError::StoreInsert(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                table = %self.config.patients_table,
                status = %status,
                body = %body,
                "Patient insert failed"
            );
            return Err(TriageError::StoreInsert(format!("{} {}", status, body)));
        }

        tracing::info!(
            table = %self.config.patients_table,
            count = rows.len(),
            "Inserted patient rows"
        );
        Ok(rows.len())
    }
}
