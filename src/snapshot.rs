//! Snapshot of an online model as a JSON value tree

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{ModelError, Result};
use crate::online::OnlineModel;

/// Key of the section holding the online hyperparameters
pub const ONLINE_SECTION: &str = "online";

impl OnlineModel {
    /// Captures the base model fields and, under [`ONLINE_SECTION`], the
    /// hyperparameters together with the current iteration count.
    pub fn capture(&self) -> Value {
        let mut root = Map::new();
        self.base().write_info(&mut root);

        let hp = self.hyperparameters();
        let mut online = Map::new();
        online.insert("power_t".into(), Value::from(hp.power_t));
        online.insert("eta".into(), Value::from(hp.eta0));
        online.insert("bias_eta".into(), Value::from(hp.bias_eta0));
        online.insert("t".into(), Value::from(self.cur_iter_num()));
        online.insert("dim".into(), Value::from(hp.dim));
        online.insert(
            "aggressive".into(),
            Value::from(if hp.aggressive { "true" } else { "false" }),
        );
        root.insert(ONLINE_SECTION.into(), Value::Object(online));

        Value::Object(root)
    }

    /// Restores a snapshot produced by [`OnlineModel::capture`].
    ///
    /// Every field of the online section is applied through
    /// [`OnlineModel::set_parameter`]. Fields are staged on a copy and
    /// committed only when all of them succeed, so a failed restore leaves
    /// the model untouched.
    pub fn restore(&mut self, root: &Value) -> Result<()> {
        let mut staged = self.clone();
        staged.base_mut().read_info(root)?;

        let online = match root.get(ONLINE_SECTION) {
            Some(Value::Object(online)) => online,
            Some(Value::Null) | None => {
                warn!("no {} section found in snapshot", ONLINE_SECTION);
                return Err(ModelError::InvalidFormat(format!(
                    "no '{}' section found",
                    ONLINE_SECTION
                )));
            }
            Some(other) => {
                return Err(ModelError::InvalidFormat(format!(
                    "section '{}' is not an object: {}",
                    ONLINE_SECTION, other
                )));
            }
        };

        for (name, value) in online {
            let text = value_text(name, value)?;
            if let Err(err) = staged.set_parameter(name, &text) {
                warn!("restoring snapshot failed: {}", err);
                return Err(err);
            }
        }

        staged.refresh_rates();
        *self = staged;
        Ok(())
    }

    /// Pretty printed snapshot
    pub fn summary(&self) -> String {
        format!("{:#}", self.capture())
    }

    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &self.capture())?;
        writer.flush()?;
        info!("saved snapshot to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_snapshot<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let contents = fs::read_to_string(&path)?;
        let root: Value = serde_json::from_str(&contents)?;
        self.restore(&root)?;
        info!("loaded snapshot from {}", path.as_ref().display());
        Ok(())
    }
}

/// Text form of a scalar snapshot field, as accepted by `set_parameter`
fn value_text(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ModelError::invalid(name, &other.to_string(), "expected a scalar value")),
    }
}
