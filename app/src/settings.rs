use config::{Config, ConfigError, Environment, File};
use infrastructure::MonitoringConfig;
use serde::Deserialize;

use crate::adapter::backend::BackendConfig;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub backend: BackendConfig,
    pub monitoring: MonitoringConfig,
}

impl Settings {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::default().separator("_").list_separator(","));

        let s = builder.build()?;
        s.try_deserialize()
    }
}
