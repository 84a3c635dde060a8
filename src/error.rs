use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unable to obtain an access token: {0}")]
    Auth(String),

    #[error("Catalog request failed: {0}")]
    Transport(String),

    #[error("Malformed catalog response at '{path}': {message}")]
    Parse { path: String, message: String },
}

impl CatalogError {
    pub(crate) fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for CatalogError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        Self::parse(path, err.into_inner().to_string())
    }
}
