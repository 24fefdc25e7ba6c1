use std::path::Path;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{HttpTransport, Retriever};

pub struct AppContext {
    pub config: Config,
    pub retriever: Retriever<HttpTransport>,
}

impl AppContext {
    /// Build from the config file at `config_path`, or the default location.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.http)?;
        let retriever = Retriever::new(transport).with_policy(config.retry.policy());

        Ok(Self { config, retriever })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_retry_policy_comes_from_config() {
        let mut config = Config::default();
        config.retry.max_attempts = 5;
        config.retry.delay_ms = 10;

        let ctx = AppContext::with_config(config).unwrap();
        assert_eq!(ctx.retriever.policy().max_attempts, 5);
        assert_eq!(ctx.retriever.policy().delay, Duration::from_millis(10));
    }
}
