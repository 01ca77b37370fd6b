use std::env;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "Outline";
const CLOUD_STORAGE_URL: &str = "https://storage.googleapis.com";
const GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything the console needs to reach its managed backend.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub course_bucket: String,
    pub cloud_storage_url: String,
    pub google_maps_api_key: String,
    pub geocode_base_url: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. An unparsable `PORT`
    /// falls back to the default rather than failing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = lookup("PORT")
            .and_then(|value| value.parse().ok())
            .unwrap_or(PORT);

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| HOST.to_string()),
            port,
            mongodb_uri: required("MONGODB_URI")?,
            database: lookup("OUTLINE_DATABASE").unwrap_or_else(|| DATABASE.to_string()),
            course_bucket: required("COURSE_BUCKET")?,
            cloud_storage_url: lookup("CLOUD_STORAGE_URL")
                .unwrap_or_else(|| CLOUD_STORAGE_URL.to_string()),
            google_maps_api_key: required("GOOGLE_MAPS_API_KEY")?,
            geocode_base_url: lookup("GEOCODE_BASE_URL")
                .unwrap_or_else(|| GEOCODE_BASE_URL.to_string()),
            admin_password: required("ADMIN_PASSWORD")?,
        })
    }
}
