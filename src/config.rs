use std::fmt;
use std::fs::File;
use std::path::Path;

use reqwest::Url;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL : &str = "https://babelnet.io/v5/";
pub const DEFAULT_TIMEOUT_SECS : u64 = 30;

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

/// Connection settings for the BabelNet HTTP API.
///
/// The key is granted on registration at babelnet.org and carries a daily
/// request quota that is enforced by the service, not here.
#[derive(Clone,Serialize,Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url : String,
    pub key : String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs : u64
}

impl Config {
    pub fn new(key : &str) -> Config {
        Config {
            base_url : default_base_url(),
            key : key.to_string(),
            timeout_secs : DEFAULT_TIMEOUT_SECS
        }
    }

    /// Load a JSON config file such as `{"key": "..."}`.
    pub fn from_file<P : AsRef<Path>>(path : P) -> Result<Config> {
        let file = File::open(path)?;
        let config : Config = serde_json::from_reader(file)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(Error::Config("api key cannot be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout must be > 0".to_string()));
        }
        self.base()?;
        Ok(())
    }

    /// The base URL, normalised to end in `/` so endpoints join below it.
    pub fn base(&self) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .map_err(|e| Error::Config(format!("bad base url {}: {}", self.base_url, e)))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_partial_json() {
        let config : Config = serde_json::from_str(r#"{"key": "abc"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        assert!(matches!(Config::new("  ").validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::new("abc");
        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_gets_trailing_slash() {
        let mut config = Config::new("abc");
        config.base_url = "http://localhost:8080/v5".to_string();
        assert_eq!(config.base().unwrap().as_str(), "http://localhost:8080/v5/");
    }

    #[test]
    fn test_debug_hides_key() {
        let shown = format!("{:?}", Config::new("secret-key"));
        assert!(!shown.contains("secret-key"));
    }
}
