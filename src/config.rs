use anyhow::{Result, anyhow};
use reqwest::Url;

/// Defaults compiled into every build; a local .env or the process environment wins on native.
pub const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const API_BASE_ENV: &str = "PDF_CHAT_API_BASE";
pub const DEFAULT_API_BASE: &str = "https://pdf-chat-backend.onrender.com";

/// Loads `.env` when present, otherwise the bundled defaults.
///
/// Neither source overrides variables that are already set.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    if let Err(err) = dotenvy::from_read(BUNDLED_CONFIG.as_bytes()) {
        tracing::warn!(error = %err, "could not apply bundled config");
    }
}

/// Runtime configuration, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn new(api_base: &str) -> Result<Self> {
        let trimmed = api_base.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| anyhow!("invalid API base {trimmed:?}: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "API base must use http or https, got {:?}",
                url.scheme()
            ));
        }
        Ok(Self {
            api_base: trimmed.to_string(),
        })
    }

    fn from_value(value: Option<&str>) -> Result<Self> {
        match value {
            Some(value) if !value.trim().is_empty() => Self::new(value),
            _ => Ok(Self::default()),
        }
    }

    /// Reads `PDF_CHAT_API_BASE`, falling back to the default origin when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var(API_BASE_ENV).ok().as_deref())
    }

    /// Picks `PDF_CHAT_API_BASE` out of key/value pairs; the last occurrence wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let value = pairs
            .into_iter()
            .filter(|(key, _)| key.as_ref() == API_BASE_ENV)
            .last()
            .map(|(_, value)| value.as_ref().to_string());
        Self::from_value(value.as_deref())
    }

    /// Parses dotenv-formatted text without touching the process environment.
    pub fn from_bundled(text: &str) -> Result<Self> {
        let pairs = dotenvy::from_read_iter(text.as_bytes()).collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(pairs)
    }

    /// Never fails: a bad value is logged and the default origin is used.
    ///
    /// wasm has no process environment, so the bundled file is the only source there.
    pub fn resolve() -> Self {
        #[cfg(target_arch = "wasm32")]
        let resolved = Self::from_bundled(BUNDLED_CONFIG);
        #[cfg(not(target_arch = "wasm32"))]
        let resolved = Self::from_env();

        match resolved {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring {API_BASE_ENV}, using {DEFAULT_API_BASE}");
                Self::default()
            }
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}
