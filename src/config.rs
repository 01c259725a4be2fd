use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::utils::error::{AppError, Result};

/// Keys that must be present before any request is made.
pub const REQUIRED_KEYS: [&str; 5] = ["subdomain", "username", "password", "folder", "format"];

const PORTAL_DOMAIN: &str = "hilan.co.il";

#[derive(Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub subdomain: String,
    pub username: String,
    pub password: String,
    pub folder: PathBuf,
    /// strftime pattern applied to the target month to name the saved PDF.
    pub format: String,
    /// Skips org id resolution when set.
    #[serde(default)]
    pub org_id: Option<u64>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl PortalConfig {
    /// Reads the YAML file at `path`, then lets `HILAN_*` environment variables override it.
    pub fn load(path: &Path) -> Result<Self> {
        let source = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("HILAN"))
            .build()?;

        Self::from_source(source)
    }

    pub fn from_source(source: Config) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| source.get_string(key).is_err())
            .map(|key| key.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(AppError::MissingConfig { keys: missing });
        }

        let config: PortalConfig = source.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.portal_url()?;
        Ok(())
    }

    /// Root of the portal, `https://<subdomain>.hilan.co.il` unless `base_url` overrides it.
    pub fn portal_url(&self) -> Result<Url> {
        let url = match &self.base_url {
            Some(base_url) => Url::parse(base_url)?,
            None => Url::parse(&format!("https://{}.{}", self.subdomain, PORTAL_DOMAIN))?,
        };
        Ok(url)
    }
}

impl fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalConfig")
            .field("subdomain", &self.subdomain)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("folder", &self.folder)
            .field("format", &self.format)
            .field("org_id", &self.org_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}
