//! Engine configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::SwipeWeights;

/// Externally supplied engine constants.
///
/// Defaults follow the product's original table; every field can be
/// overridden through the `SWIPE`-prefixed environment, a config file, or
/// CLI arguments, whichever the embedding process wires up.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SWIPE")]
pub struct EngineSettings {
    /// Rewinds each user may perform per local day.
    #[ortho_config(default = 3)]
    pub rewind_daily_limit: u32,
    /// Score granted to a liked user.
    #[ortho_config(default = 5)]
    pub like_weight: i64,
    /// Score granted to a disliked user.
    #[ortho_config(default = -5)]
    pub dislike_weight: i64,
    /// Score granted to a superliked user.
    #[ortho_config(default = 7)]
    pub superlike_weight: i64,
}

impl EngineSettings {
    /// The per-swipe-type weight table these settings describe.
    pub const fn weights(&self) -> SwipeWeights {
        SwipeWeights {
            like: self.like_weight,
            dislike: self.dislike_weight,
            superlike: self.superlike_weight,
        }
    }
}
