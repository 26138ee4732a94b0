use serde::{Deserialize, Serialize};
use std::fmt;

/// The two evaluation splits. Each has its own accumulator; rows
/// from one are never mixed into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    Dev,
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Dev  => f.write_str("Dev"),
            Split::Test => f.write_str("Test"),
        }
    }
}

/// What the network reports for a split. Both values are opaque
/// to the driver: perplexity is never recomputed from the loss here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitScore {
    pub mean_loss:  f64,
    pub perplexity: f64,
}
