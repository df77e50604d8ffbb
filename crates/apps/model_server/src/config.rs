use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use serde::Deserialize;

const DEFAULT_ADDR: &str = "0.0.0.0:1323";
const DEFAULT_CATALOG: &str = "./sapporo.json";
const DEFAULT_PUBLIC_ROOT: &str = "public";
const DEFAULT_BASE_URL: &str = "https://snow-globe.almikan.com";
const DEFAULT_HIGH_TIER: &str = "sapporo_256";
const DEFAULT_LOW_TIER: &str = "sapporo_64";

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Radius search over a static 3D city model catalog")]
pub struct Args {
    /// Listen address (env: MODEL_ADDR)
    #[arg(long)]
    pub addr: Option<String>,

    /// Catalog JSON file (env: MODEL_CATALOG)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory served under /public (env: MODEL_PUBLIC_ROOT)
    #[arg(long)]
    pub public_root: Option<PathBuf>,

    /// Base URL prefixed to model URLs (env: MODEL_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Asset tier for high-detail searches (env: MODEL_HIGH_TIER)
    #[arg(long)]
    pub high_tier: Option<String>,

    /// Asset tier for low-detail searches (env: MODEL_LOW_TIER)
    #[arg(long)]
    pub low_tier: Option<String>,

    /// Detail level used when a request names none: high or low (env: MODEL_DEFAULT_DETAIL)
    #[arg(long)]
    pub default_detail: Option<String>,
}

/// Resolution level of a search. High detail uses strict corner
/// containment, low detail uses centroid distance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    #[default]
    High,
    Low,
}

impl FromStr for DetailLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(DetailLevel::High),
            "low" => Ok(DetailLevel::Low),
            _ => Err(ConfigError::Invalid {
                key: "default_detail",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub catalog_path: PathBuf,
    pub public_root: PathBuf,
    pub base_url: String,
    pub high_tier: String,
    pub low_tier: String,
    pub default_detail: DetailLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => write!(f, "invalid {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    pub fn from_env(args: Args) -> Result<Self, ConfigError> {
        Self::resolve(args, |key| env::var(key).ok())
    }

    /// Flags win over `lookup` (environment), which wins over defaults.
    pub fn resolve(
        args: Args,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let pick = |flag: Option<String>, key: &str, default: &str| {
            flag.or_else(|| lookup(key))
                .unwrap_or_else(|| default.to_string())
        };

        let addr_raw = pick(args.addr, "MODEL_ADDR", DEFAULT_ADDR);
        let addr: SocketAddr = addr_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "addr",
            value: addr_raw.clone(),
        })?;

        let default_detail = match args.default_detail.or_else(|| lookup("MODEL_DEFAULT_DETAIL")) {
            Some(raw) => raw.parse::<DetailLevel>()?,
            None => DetailLevel::default(),
        };

        let catalog_path = args
            .catalog
            .or_else(|| lookup("MODEL_CATALOG").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG));
        let public_root = args
            .public_root
            .or_else(|| lookup("MODEL_PUBLIC_ROOT").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_ROOT));

        Ok(ServerConfig {
            addr,
            catalog_path,
            public_root,
            base_url: pick(args.base_url, "MODEL_BASE_URL", DEFAULT_BASE_URL),
            high_tier: pick(args.high_tier, "MODEL_HIGH_TIER", DEFAULT_HIGH_TIER),
            low_tier: pick(args.low_tier, "MODEL_LOW_TIER", DEFAULT_LOW_TIER),
            default_detail,
        })
    }
}
