use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown line preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },
    #[error("source node '{0}' is not part of the scene")]
    UnknownNode(String),
    #[error("unsupported {kind} format: .{ext}")]
    UnsupportedFormat { kind: &'static str, ext: String },
    #[error("preview export failed: {0}")]
    Export(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
