// config lets you read a separate config file
use config::{Config, Environment, File};
use serde::Deserialize;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CONFIG_NAME: &str = "neows";
pub const ENV_PREFIX: &str = "NEOWS";

/// Where the data lives and how the binary behaves.
///
/// Values are layered: built-in defaults, then a `neows.{toml,json,yaml}`
/// file in the working directory (or the file given explicitly, which must
/// exist), then `NEOWS_*` environment variables such as `NEOWS_NEO_FILE`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub neo_file: PathBuf,
    pub cad_file: PathBuf,
    // applies when results are printed rather than written to a file
    pub default_limit: usize,
    pub log_filter: String,
    // skip unparsable data rows with a warning instead of failing the load
    pub skip_malformed: bool,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_NAME).required(false),
        };
        let settings = Config::builder()
            .set_default("neo_file", "data/neos.csv")?
            .set_default("cad_file", "data/cad.json")?
            .set_default("default_limit", 10_i64)?
            .set_default("log_filter", "info")?
            .set_default("skip_malformed", false)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}
