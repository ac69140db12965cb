use serde::{Deserialize, Serialize};

/// A hardware axis driven during tuning (a motor, a filter wheel slot, a
/// grating position).
///
/// The optional default is used when an arrangement carries no curve for
/// this setable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Setable {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<f64>,
}

impl Setable {
    /// A setable with no default position.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A setable with a default position.
    pub fn with_default(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }

    /// The setable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The default position, if any.
    pub fn default(&self) -> Option<f64> {
        self.default
    }
}
