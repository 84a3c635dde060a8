use super::Credentials;
use crate::catalog::CatalogOps;
use crate::error::CatalogError;
use crate::query::CatalogQuery;
use crate::scene::{self, SceneRecord};
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

const TOKEN_PATH: &str = "oauth/token";
const SEARCH_PATH: &str = "catalog/stac/search";

/// UP42 catalog, authenticated with the client-credentials grant.
pub struct Provider {
    client: Client,
    credentials: Credentials,
}

#[derive(Deserialize)]
struct TokenResponse {
    data: TokenData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenData {
    access_token: String,
}

impl Provider {
    pub fn new(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn from_credentials(credentials: Credentials) -> Self {
        Self::new(Client::new(), credentials)
    }

    /// Exchanges the project id and API key for a bearer token.
    pub async fn access_token(self: &Self) -> Result<String, CatalogError> {
        let url = self.credentials.endpoint(TOKEN_PATH);
        debug!("Requesting access token from {url}");

        let response = self
            .client
            .post(&url)
            .basic_auth(
                &self.credentials.project_id,
                Some(&self.credentials.project_api_key),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CatalogError::Auth(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Auth(e.to_string()))?;
        parse_token_response(&body)
    }
}

impl CatalogOps for Provider {
    async fn search(self: &Self, query: &CatalogQuery) -> Result<Vec<SceneRecord>, CatalogError> {
        let token = self.access_token().await?;

        let url = self.credentials.endpoint(SEARCH_PATH);
        info!("Searching {url} for {}", query.datetime());

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let records = scene::parse_search_response(&body)?;
        info!("Catalog returned {} scenes", records.len());
        Ok(records)
    }
}

fn parse_token_response(body: &[u8]) -> Result<String, CatalogError> {
    let token: TokenResponse = serde_json::from_slice(body)
        .map_err(|e| CatalogError::Auth(format!("no access token in response: {e}")))?;
    Ok(token.data.access_token)
}
