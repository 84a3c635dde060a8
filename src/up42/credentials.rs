use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use url::Url;

pub const BACKEND_URL_VAR: &str = "UP42_BACKEND_URL";
pub const PROJECT_ID_VAR: &str = "UP42_PROJECT_ID";
pub const PROJECT_API_KEY_VAR: &str = "UP42_PROJECT_API_KEY";

/// Project credentials for the UP42 API, laid out like the `secrets.toml`
/// the web app reads:
///
/// ```toml
/// backend_url = "https://api.up42.com"
/// project_id = "..."
/// project_api_key = "..."
/// ```
#[derive(Deserialize, Serialize, Clone)]
pub struct Credentials {
    pub backend_url: Url,
    pub project_id: String,
    pub project_api_key: String,
}

impl Credentials {
    pub fn new(backend_url: Url, project_id: &str, project_api_key: &str) -> Self {
        Self {
            backend_url,
            project_id: project_id.to_string(),
            project_api_key: project_api_key.to_string(),
        }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let credentials: Self = toml::from_str(&content)?;
        Ok(credentials)
    }

    pub fn from_env() -> Result<Self> {
        let var = |name: &str| env::var(name).map_err(|_| anyhow!("{name} is not set"));
        let backend_url = Url::parse(&var(BACKEND_URL_VAR)?)?;
        Ok(Self::new(
            backend_url,
            &var(PROJECT_ID_VAR)?,
            &var(PROJECT_API_KEY_VAR)?,
        ))
    }

    /// `backend_url` joined with `path`, tolerating a trailing slash on the base.
    pub fn endpoint(self: &Self, path: &str) -> String {
        format!(
            "{}/{}",
            self.backend_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("backend_url", &self.backend_url.as_str())
            .field("project_id", &self.project_id)
            .field("project_api_key", &"<redacted>")
            .finish()
    }
}
