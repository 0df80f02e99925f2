use crate::config::SupabaseConfig;
use crate::error::TriageError;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn download(&self, path: &str) -> Result<Vec<u8>, TriageError>;
}

/// Supabase Storage bucket accessed with the service-role key.
pub struct SupabaseStorage {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseStorage {
    pub fn new(client: Client, config: SupabaseConfig) -> Self {
        Self { client, config }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url.trim_end_matches('/'),
            self.config.bucket,
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Storage for SupabaseStorage {
    async fn download(&self, path: &str) -> Result<Vec<u8>, TriageError> {
        let key = self.config.service_key.expose_secret();

        let response = self
            .client
            .get(self.object_url(path))
            .bearer_auth(key)
            .header("apikey", key)
            .send()
            .await
            .map_err(|e| TriageError::StorageDownload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(path = %path, status = %status, body = %body, "Storage download failed");
            return Err(TriageError::StorageDownload(format!("{} {}", status, body)));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| TriageError::StorageDownload(e.to_string()))?
            .to_vec();

        tracing::debug!(path = %path, size = data.len(), "Downloaded document");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn storage_for(server: &MockServer) -> SupabaseStorage {
        SupabaseStorage::new(
            Client::new(),
            SupabaseConfig {
                url: format!("{}/", server.uri()),
                service_key: Secret::new("service-key".to_string()),
                bucket: "medical-documents".to_string(),
                patients_table: "patients".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn download_returns_object_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/storage/v1/object/medical-documents/scans/report.pdf"))
            .and(header("authorization", "Bearer service-key"))
            .and(header("apikey", "service-key"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let data = storage_for(&server)
            .download("/scans/report.pdf")
            .await
            .unwrap();
        assert_eq!(data, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn missing_object_is_a_storage_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Object not found"))
            .mount(&server)
            .await;

        let err = storage_for(&server).download("nope.jpg").await.unwrap_err();
        match err {
            TriageError::StorageDownload(msg) => assert!(msg.contains("Object not found")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
