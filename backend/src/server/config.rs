//! Server settings and the resolved server configuration.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use backend::inbound::http::hal::{InvalidLinkBase, ResourceLinks};
use backend::inbound::http::session_config::SessionSettings;
use backend::inbound::http::state::DEFAULT_UPLOAD_LIMIT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REST_URL: &str = "http://localhost:8080";

/// Deployment settings layered from CLI flags, `REPOSITORY_*` environment
/// variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REPOSITORY")]
pub struct ServerSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Public base URL hypermedia links are built from.
    pub rest_url: Option<String>,
    /// Directory of the filesystem asset store. Unset keeps blobs in memory.
    pub assetstore_dir: Option<PathBuf>,
    /// Largest accepted request body for uploads, in bytes.
    pub max_upload_bytes: Option<usize>,
}

/// Settings values that failed to parse.
#[derive(Debug, thiserror::Error)]
pub enum ServerSettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("invalid REST base URL '{value}': {source}")]
    RestUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unusable REST base URL '{value}': {source}")]
    LinkBase {
        value: String,
        #[source]
        source: InvalidLinkBase,
    },
}

impl From<ServerSettingsError> for std::io::Error {
    fn from(value: ServerSettingsError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, value)
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| ServerSettingsError::BindAddr {
                value: value.to_owned(),
                source,
            })
    }

    pub fn rest_url(&self) -> Result<Url, ServerSettingsError> {
        let value = self.rest_url.as_deref().unwrap_or(DEFAULT_REST_URL);
        Url::parse(value).map_err(|source| ServerSettingsError::RestUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Link builder rooted at [`Self::rest_url`].
    ///
    /// # Errors
    /// Returns [`ServerSettingsError::LinkBase`] for URLs such as `mailto:`
    /// that cannot carry path segments.
    pub fn links(&self) -> Result<ResourceLinks, ServerSettingsError> {
        let url = self.rest_url()?;
        let value = url.to_string();
        ResourceLinks::new(url).map_err(|source| ServerSettingsError::LinkBase { value, source })
    }

    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_UPLOAD_LIMIT)
    }
}

/// Fully resolved configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) links: ResourceLinks,
    pub(crate) assetstore_dir: Option<PathBuf>,
    pub(crate) upload_limit: usize,
}

impl ServerConfig {
    /// Combine deployment settings with validated session settings.
    ///
    /// # Errors
    /// Returns [`ServerSettingsError`] when the bind address does not parse
    /// or the base URL cannot anchor resource links.
    pub fn resolve(
        settings: &ServerSettings,
        session: SessionSettings,
    ) -> Result<Self, ServerSettingsError> {
        Ok(Self {
            session,
            bind_addr: settings.bind_addr()?,
            links: settings.links()?,
            assetstore_dir: settings.assetstore_dir.clone(),
            upload_limit: settings.max_upload_bytes(),
        })
    }
}
