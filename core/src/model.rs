use serde::{Deserialize, Serialize};

/// One directed road segment as it appears in configuration.
///
/// `weight` is signed so that a negative value in a config file reaches the
/// graph store and is rejected there instead of failing deserialization with
/// an opaque message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub weight: i64,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}
