use std::{net::SocketAddr, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} in environment variable {name}")]
    ConfigEnv { name: &'static str, value: String },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("failed to build automation http client: {0}")]
    HttpClientBuild(#[source] reqwest::Error),
    #[error("failed to render pairing QR code: {0}")]
    QrRender(String),
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid listen address {0:?}")]
    ListenAddr(String),
    #[error("server stopped with an error: {0}")]
    Serve(#[source] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
