//! Configuration loader for Sprite.
//!
//! Reads `config.toml` from the data directory (`~/.sprite/` in production)
//! and deserializes it into [`SpriteConfig`]. Falls back to defaults when
//! the file is missing or malformed, then applies environment overrides.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use sprite_types::config::SpriteConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SPRITE_DATA_DIR";

/// Environment variable overriding `bot_id`.
pub const BOT_ID_ENV: &str = "SPRITE_BOT_ID";

/// Environment variable overriding `model`.
pub const MODEL_ENV: &str = "SPRITE_MODEL";

/// Errors raised when the configuration cannot drive a responder.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("bot_id is not configured (set it in config.toml or SPRITE_BOT_ID)")]
    MissingBotId,

    #[error("API key not found: environment variable {var} is unset or empty")]
    MissingApiKey { var: String },
}

/// Resolve the data directory.
///
/// Priority: `$SPRITE_DATA_DIR`, then `~/.sprite`, then `./.sprite`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".sprite");
    }

    PathBuf::from(".sprite")
}

/// Load configuration from `{data_dir}/config.toml` and apply process
/// environment overrides.
pub async fn load_config(data_dir: &Path) -> SpriteConfig {
    let mut config = read_config_file(data_dir).await;
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Read `{data_dir}/config.toml`.
///
/// - Missing file: [`SpriteConfig::default()`].
/// - Unreadable or malformed file: warning, then the default.
async fn read_config_file(data_dir: &Path) -> SpriteConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return SpriteConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return SpriteConfig::default();
        }
    };

    match toml::from_str::<SpriteConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            SpriteConfig::default()
        }
    }
}

/// Apply `SPRITE_BOT_ID` / `SPRITE_MODEL` overrides. Blank values are ignored.
pub fn apply_overrides(config: &mut SpriteConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(bot_id) = non_blank(BOT_ID_ENV) {
        config.bot_id = bot_id.trim().to_string();
    }
    if let Some(model) = non_blank(MODEL_ENV) {
        config.model = model.trim().to_string();
    }
}

/// Check that the configuration names a bot identity.
pub fn validate(config: &SpriteConfig) -> Result<(), ConfigError> {
    if config.bot_id.trim().is_empty() {
        return Err(ConfigError::MissingBotId);
    }
    Ok(())
}

/// Read the API key from the variable named by `api_key_env`.
pub fn resolve_api_key(
    config: &SpriteConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    lookup(&config.api_key_env)
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingApiKey {
            var: config.api_key_env.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn read_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config_file(tmp.path()).await;
        assert!(config.bot_id.is_empty());
        assert_eq!(config.model, "llama3-70b-8192");
        assert_eq!(config.context.max_turns, 50);
    }

    #[tokio::test]
    async fn read_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
bot_id = "1234"
model = "llama3-8b-8192"

[context]
max_turns = 20
"#,
        )
        .await
        .unwrap();

        let config = read_config_file(tmp.path()).await;
        assert_eq!(config.bot_id, "1234");
        assert_eq!(config.model, "llama3-8b-8192");
        assert_eq!(config.context.max_turns, 20);
        assert_eq!(config.context.max_chars, 4000);
    }

    #[tokio::test]
    async fn read_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = read_config_file(tmp.path()).await;
        assert!(config.bot_id.is_empty());
        assert_eq!(config.api_key_env, "GROQ_API_KEY");
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = SpriteConfig {
            bot_id: "from-file".into(),
            ..SpriteConfig::default()
        };
        apply_overrides(
            &mut config,
            env(&[(BOT_ID_ENV, " 42 "), (MODEL_ENV, "mixtral-8x7b-32768")]),
        );
        assert_eq!(config.bot_id, "42");
        assert_eq!(config.model, "mixtral-8x7b-32768");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = SpriteConfig {
            bot_id: "from-file".into(),
            ..SpriteConfig::default()
        };
        apply_overrides(&mut config, env(&[(BOT_ID_ENV, "  ")]));
        assert_eq!(config.bot_id, "from-file");
        assert_eq!(config.model, "llama3-70b-8192");
    }

    #[test]
    fn validate_requires_bot_id() {
        let config = SpriteConfig::default();
        assert!(matches!(validate(&config), Err(ConfigError::MissingBotId)));

        let config = SpriteConfig {
            bot_id: "42".into(),
            ..SpriteConfig::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn resolve_api_key_reads_named_variable() {
        let config = SpriteConfig {
            api_key_env: "MY_KEY".into(),
            ..SpriteConfig::default()
        };
        let key = resolve_api_key(&config, env(&[("MY_KEY", "gsk-abc")])).unwrap();
        assert_eq!(key.expose_secret(), "gsk-abc");

        let err = resolve_api_key(&config, env(&[("MY_KEY", "")])).unwrap_err();
        assert!(err.to_string().contains("MY_KEY"));
    }
}
