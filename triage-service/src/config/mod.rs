use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Model used for every completion request.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct TriageConfig {
    pub common: core_config::Config,
    pub gateway: GatewayConfig,
    pub supabase: SupabaseConfig,
    /// Optional OTLP collector endpoint; spans are only exported when set.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub url: String,
    pub api_key: Secret<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    pub service_key: Secret<String>,
    /// Bucket holding uploaded medical documents.
    pub bucket: String,
    /// Table receiving synthetic patient rows.
    pub patients_table: String,
}

impl TriageConfig {
    /// Load from `.env`, `APP__*` and the process environment.
    ///
    /// Missing secrets are fatal: the service refuses to start without the
    /// gateway key, storage URL and storage service key.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_source(common, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_source<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: Option<&str>| get_value(&lookup, key, default);

        Ok(TriageConfig {
            common,
            gateway: GatewayConfig {
                url: get("AI_GATEWAY_URL", Some(DEFAULT_GATEWAY_URL))?,
                api_key: Secret::new(get("AI_GATEWAY_API_KEY", None)?),
                model: get("AI_MODEL", Some(DEFAULT_MODEL))?,
            },
            supabase: SupabaseConfig {
                url: get("STORAGE_URL", None)?,
                service_key: Secret::new(get("STORAGE_SERVICE_KEY", None)?),
                bucket: get("STORAGE_BUCKET", Some("medical-documents"))?,
                patients_table: get("PATIENTS_TABLE", Some("patients"))?,
            },
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }
}

fn get_value<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        Some(val) => Ok(val),
        None => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
