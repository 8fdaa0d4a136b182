use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vidstream_common::paths::DEFAULT_ALLOWED_EXTENSIONS;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub streaming: StreamingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Prebuilt player UI served as a SPA fallback
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Send permissive CORS headers (any origin)
    #[serde(default = "default_true")]
    pub cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            cors: default_true(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamingConfig {
    /// Directory all servable videos live directly under
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,

    /// Upper bound for a single body chunk, in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Lifetime advertised through `Cache-Control` and `Expires`
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u64,

    /// Lowercase extensions (no dot) that may be streamed
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_content_root() -> PathBuf {
    PathBuf::from("./videos")
}
fn default_chunk_size() -> usize {
    8 * 1024
}
fn default_cache_max_age() -> u64 {
    3600
}
fn default_allowed_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            chunk_size: default_chunk_size(),
            cache_max_age_secs: default_cache_max_age(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl StreamingConfig {
    /// Config rooted at `content_root` with every other field defaulted.
    pub fn with_root(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            ..Self::default()
        }
    }

    /// Whether `ext` (any case) is in the allow-list.
    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}
