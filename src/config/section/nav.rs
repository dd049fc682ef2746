//! `[nav]` section configuration.
//!
//! Settings for the in-page navigation runtime shipped as `nav.js`.
//!
//! ```toml
//! [nav]
//! header_offset = 80        # px hidden under the fixed navbar
//! smooth = true             # animate anchor jumps
//! prefix_match = "segment"  # "segment" | "substring"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::PrefixMatch;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Height of the fixed header subtracted from every anchor target.
    pub header_offset: u32,

    /// Intercept anchor clicks and scroll smoothly.
    pub smooth: bool,

    /// How the browser recognises the deployment prefix.
    pub prefix_match: PrefixMatch,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            header_offset: 80,
            smooth: true,
            prefix_match: PrefixMatch::Segment,
        }
    }
}

impl NavConfig {
    pub const PREFIX_MATCH: FieldPath = FieldPath::new("nav.prefix_match");
    pub const HEADER_OFFSET: FieldPath = FieldPath::new("nav.header_offset");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.prefix_match == PrefixMatch::Substring {
            diag.warn(
                Self::PREFIX_MATCH,
                "\"substring\" also matches routes that merely contain the prefix text, prefer \"segment\"",
            );
        }
        if self.header_offset > 1000 {
            diag.warn(
                Self::HEADER_OFFSET,
                format!("{}px is taller than most viewports", self.header_offset),
            );
        }
    }
}
