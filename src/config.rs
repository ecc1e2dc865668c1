//! Model configuration via TOML files.
//!
//! ```toml
//! [model]
//! norm = "l2"
//!
//! [online]
//! eta = 0.5
//! power_t = 1.0
//! aggressive = "false"
//! ```
//!
//! Every key is applied through the same named-parameter setter used at
//! runtime, so files are validated exactly like direct calls.

use std::fs;
use std::path::Path;

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::{ModelError, Result};
use crate::online::OnlineModel;
use crate::snapshot::ONLINE_SECTION;

const MODEL_SECTION: &str = "model";

/// Parameter assignments read from a configuration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelConfig {
    pub model: Vec<(String, String)>,
    pub online: Vec<(String, String)>,
}

impl ModelConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let table: Table = toml_str
            .parse()
            .map_err(|e: toml::de::Error| ModelError::Config(e.to_string()))?;

        let mut config = ModelConfig::default();
        for (section, value) in &table {
            let entries = match section.as_str() {
                MODEL_SECTION => &mut config.model,
                ONLINE_SECTION => &mut config.online,
                other => {
                    warn!("ignoring unknown configuration section [{}]", other);
                    continue;
                }
            };
            let params = value
                .as_table()
                .ok_or_else(|| ModelError::Config(format!("[{}] must be a table", section)))?;
            for (key, value) in params {
                entries.push((key.clone(), value_text(section, key, value)?));
            }
        }

        Ok(config)
    }

    /// Applies base parameters first, then the online ones. Stops at the
    /// first invalid value.
    pub fn apply(&self, model: &mut OnlineModel) -> Result<()> {
        for (name, value) in &self.model {
            model.base_mut().set_parameter(name, value)?;
        }
        for (name, value) in &self.online {
            model.set_parameter(name, value)?;
        }
        debug!(
            "applied {} configuration values",
            self.model.len() + self.online.len()
        );
        Ok(())
    }
}

fn value_text(section: &str, key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        _ => Err(ModelError::Config(format!(
            "{}.{} must be a string, number or boolean",
            section, key
        ))),
    }
}
