use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Each setting can also come from the variable names used by the web and
/// mobile deployments. The first non-empty one wins over the config file.
const ENV_VARIANTS: [(&str, [&str; 2]); 3] = [
    ("supabase_url", ["SUPABASE_URL", "EXPO_PUBLIC_SUPABASE_URL"]),
    (
        "supabase_anon_key",
        ["SUPABASE_ANON_KEY", "EXPO_PUBLIC_SUPABASE_ANON_KEY"],
    ),
    ("api_base_url", ["API_BASE_URL", "EXPO_PUBLIC_API_URL"]),
];

#[derive(Debug, Clone)]
pub struct Settings {
    pub supabase_url: String,
    pub supabase_anon_key: SecretString,
    pub api_base_url: String,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    supabase_url: String,
    #[serde(default)]
    supabase_anon_key: String,
    #[serde(default = "default_api_base_url")]
    api_base_url: String,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        Self {
            supabase_url: raw.supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key: SecretString::from(raw.supabase_anon_key),
            api_base_url: raw.api_base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("HARAKA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        Self::load(&config_path, |name| std::env::var(name).ok())
    }

    fn load<F>(config_path: &str, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("HARAKA").separator("__"));

        for (key, names) in ENV_VARIANTS {
            let value = names
                .iter()
                .find_map(|name| env(name).filter(|v| !v.trim().is_empty()));
            builder = builder.set_override_option(key, value)?;
        }

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        Ok(raw.into())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.supabase_url.is_empty() {
            return Err("supabase_url is required".to_string());
        }
        if !is_http_url(&self.supabase_url) {
            return Err("supabase_url must be a valid HTTP(S) URL".to_string());
        }
        if self.supabase_anon_key.expose_secret().trim().is_empty() {
            return Err("supabase_anon_key is required".to_string());
        }
        if !is_http_url(&self.api_base_url) {
            return Err("api_base_url must be a valid HTTP(S) URL".to_string());
        }
        Ok(())
    }
}

/// An absolute `http` or `https` URL with a host.
fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn missing_file() -> String {
        let dir = tempfile::tempdir().unwrap();
        dir.path().join("absent.toml").display().to_string()
    }

    #[test]
    fn reads_expo_variants() {
        let settings = Settings::load(
            &missing_file(),
            env_of(&[
                ("EXPO_PUBLIC_SUPABASE_URL", "https://abc.supabase.co/"),
                ("EXPO_PUBLIC_SUPABASE_ANON_KEY", "anon"),
                ("EXPO_PUBLIC_API_URL", "https://pay.example.com"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.supabase_url, "https://abc.supabase.co");
        assert_eq!(settings.supabase_anon_key.expose_secret(), "anon");
        assert_eq!(settings.api_base_url, "https://pay.example.com");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn plain_names_win_over_expo_names() {
        let settings = Settings::load(
            &missing_file(),
            env_of(&[
                ("SUPABASE_URL", "https://plain.supabase.co"),
                ("EXPO_PUBLIC_SUPABASE_URL", "https://expo.supabase.co"),
                ("SUPABASE_ANON_KEY", "k"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.supabase_url, "https://plain.supabase.co");
        assert_eq!(settings.api_base_url, "http://localhost:3000");
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("haraka.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "supabase_url = \"https://file.supabase.co\"").unwrap();
        writeln!(file, "supabase_anon_key = \"from-file\"").unwrap();

        let settings = Settings::load(
            path.to_str().unwrap(),
            env_of(&[("SUPABASE_ANON_KEY", "from-env")]),
        )
        .unwrap();

        assert_eq!(settings.supabase_url, "https://file.supabase.co");
        assert_eq!(settings.supabase_anon_key.expose_secret(), "from-env");
    }

    #[test]
    fn validate_rejects_missing_values() {
        let settings = Settings::load(&missing_file(), env_of(&[])).unwrap();
        assert_eq!(
            settings.validate().unwrap_err(),
            "supabase_url is required"
        );

        let settings = Settings::load(
            &missing_file(),
            env_of(&[("SUPABASE_URL", "ftp://nope"), ("SUPABASE_ANON_KEY", "k")]),
        )
        .unwrap();
        assert!(settings.validate().is_err());

        let settings = Settings::load(
            &missing_file(),
            env_of(&[("SUPABASE_URL", "https://abc.supabase.co")]),
        )
        .unwrap();
        assert_eq!(
            settings.validate().unwrap_err(),
            "supabase_anon_key is required"
        );
    }

    #[test]
    fn validate_requires_http_scheme_and_host() {
        for url in ["httpfoo://abc.supabase.co", "https://", "abc.supabase.co"] {
            assert!(!is_http_url(url), "{url}");
        }
        assert!(is_http_url("https://abc.supabase.co"));
        assert!(is_http_url("http://localhost:54321"));

        let settings = Settings::load(
            &missing_file(),
            env_of(&[
                ("SUPABASE_URL", "https://abc.supabase.co"),
                ("SUPABASE_ANON_KEY", "anon"),
                ("API_BASE_URL", "httpsx://pay.example.com"),
            ]),
        )
        .unwrap();
        assert_eq!(
            settings.validate().unwrap_err(),
            "api_base_url must be a valid HTTP(S) URL"
        );
    }
}
