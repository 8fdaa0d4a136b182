mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;
    normalize_extensions(&mut config.streaming.allowed_extensions);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./vidstream.toml",
        "~/.config/vidstream/config.toml",
        "/etc/vidstream/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Strip leading dots and lowercase, so `".MP4"` and `"mp4"` are the same entry.
fn normalize_extensions(extensions: &mut Vec<String>) {
    for ext in extensions.iter_mut() {
        *ext = ext.trim_start_matches('.').to_ascii_lowercase();
    }
    extensions.sort();
    extensions.dedup();
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.streaming.chunk_size == 0 {
        anyhow::bail!("streaming.chunk_size must be greater than 0");
    }

    if config.streaming.allowed_extensions.is_empty() {
        anyhow::bail!("streaming.allowed_extensions cannot be empty");
    }

    if !config.streaming.content_root.is_dir() {
        tracing::warn!(
            "Content root does not exist or is not a directory: {:?}",
            config.streaming.content_root
        );
    }

    if let Some(ref dir) = config.server.static_dir {
        if !dir.exists() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.server.cors);
        assert_eq!(config.streaming.chunk_size, 8192);
        assert_eq!(config.streaming.cache_max_age_secs, 3600);
        assert_eq!(
            config.streaming.allowed_extensions,
            vec!["mp4", "ogg", "webm"]
        );
    }

    #[test]
    fn test_streaming_section() {
        let file = write_config(
            r#"
[streaming]
content_root = "/srv/videos"
chunk_size = 65536
allowed_extensions = [".MKV", "mp4", "mkv"]
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.streaming.content_root,
            std::path::PathBuf::from("/srv/videos")
        );
        assert_eq!(config.streaming.chunk_size, 65536);
        assert_eq!(config.streaming.allowed_extensions, vec!["mkv", "mp4"]);
    }

    #[test]
    fn test_zero_port_rejected() {
        let file = write_config("[server]\nport = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let file = write_config("[streaming]\nchunk_size = 0\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_empty_allow_list_rejected() {
        let file = write_config("[streaming]\nallowed_extensions = []\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let file = write_config("[server\nport = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_allows_extension_ignores_case() {
        let config = StreamingConfig::default();
        assert!(config.allows_extension("MP4"));
        assert!(!config.allows_extension("mkv"));
    }
}
