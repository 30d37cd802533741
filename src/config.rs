use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FETCH_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub fetch_delay: Duration,
    /// 指定すると生成される投稿のいいね数・コメント数が再現可能になる
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            rng_seed: None,
        }
    }
}

impl AppConfig {
    /// 環境変数から読み込む（`.env` は main で先に読み込んでおく）
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {:?}", v))?,
            None => defaults.port,
        };

        let fetch_delay = match lookup("FETCH_DELAY_MS") {
            Some(v) => Duration::from_millis(
                v.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid FETCH_DELAY_MS: {:?}", v))?,
            ),
            None => defaults.fetch_delay,
        };

        let rng_seed = lookup("FEED_RNG_SEED")
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid FEED_RNG_SEED: {:?}", v))
            })
            .transpose()?;

        Ok(Self {
            port,
            fetch_delay,
            rng_seed,
        })
    }
}
