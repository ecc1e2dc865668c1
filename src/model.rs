use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::debug;

use crate::data::DataPoint;
use crate::error::{ModelError, Result};

/// Feature normalization applied before an example reaches the learning rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Norm {
    #[default]
    None,
    L1,
    L2,
}

impl Norm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Norm::None => "none",
            Norm::L1 => "l1",
            Norm::L2 => "l2",
        }
    }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Norm {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "none" => Ok(Norm::None),
            "l1" => Ok(Norm::L1),
            "l2" => Ok(Norm::L2),
            other => Err(ModelError::invalid("norm", other, "expected one of none, l1, l2")),
        }
    }
}

/// State shared by every model: class count, preprocessing and the
/// update counter.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBase {
    type_name: String,
    class_num: usize,
    norm: Norm,
    update_num: u64,
}

impl ModelBase {
    pub fn new(class_num: usize, type_name: impl Into<String>) -> Self {
        ModelBase {
            type_name: type_name.into(),
            class_num,
            norm: Norm::None,
            update_num: 0,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn class_num(&self) -> usize {
        self.class_num
    }

    /// Number of scores a classifier produces: a single scorer for the
    /// binary case, one per class otherwise.
    pub fn clf_num(&self) -> usize {
        if self.class_num == 2 {
            1
        } else {
            self.class_num
        }
    }

    pub fn norm(&self) -> Norm {
        self.norm
    }

    pub fn update_num(&self) -> u64 {
        self.update_num
    }

    pub fn inc_update_num(&mut self) {
        self.update_num += 1;
    }

    /// Sets a base-level parameter. Unknown names are rejected.
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "norm" => {
                self.norm = value.parse()?;
                debug!("norm set to {}", self.norm);
                Ok(())
            }
            _ => Err(ModelError::invalid(name, value, "unknown parameter")),
        }
    }

    /// Applies the configured normalization, borrowing when there is
    /// nothing to do.
    pub fn preprocess<'a>(&self, x: &'a DataPoint) -> Cow<'a, DataPoint> {
        let norm = match self.norm {
            Norm::None => return Cow::Borrowed(x),
            Norm::L1 => x.features.iter().map(|v| v.abs()).sum::<f32>(),
            Norm::L2 => x.features.dot(&x.features).sqrt(),
        };
        if norm <= 0.0 {
            return Cow::Borrowed(x);
        }

        let mut normalized = x.clone();
        normalized.features.mapv_inplace(|v| v / norm);
        Cow::Owned(normalized)
    }

    pub(crate) fn write_info(&self, root: &mut Map<String, Value>) {
        root.insert("model".into(), Value::from(self.type_name.clone()));
        root.insert("cls_num".into(), Value::from(self.class_num));
        root.insert("norm".into(), Value::from(self.norm.as_str()));
        root.insert("update_num".into(), Value::from(self.update_num));
    }

    pub(crate) fn read_info(&mut self, root: &Value) -> Result<()> {
        if let Some(cls_num) = root.get("cls_num") {
            if cls_num.as_u64() != Some(self.class_num as u64) {
                return Err(ModelError::InvalidFormat(format!(
                    "class number mismatch: model has {}, snapshot has {}",
                    self.class_num, cls_num
                )));
            }
        }
        if let Some(norm) = root.get("norm").and_then(Value::as_str) {
            self.norm = norm.parse()?;
        }
        if let Some(update_num) = root.get("update_num") {
            self.update_num = update_num.as_u64().ok_or_else(|| {
                ModelError::invalid(
                    "update_num",
                    &update_num.to_string(),
                    "expected a non-negative integer",
                )
            })?;
        }
        Ok(())
    }
}
