//! Storage format options
//!
//! Layout and hypersparsity are performance hints: they are carried by every
//! matrix, copied by `dup`, and observable, but no operation's result
//! depends on them.

use sparsegb_core::format::{ALWAYS_HYPER, DEFAULT_HYPER_SWITCH, NEVER_HYPER};
use sparsegb_core::Layout;

/// Format configuration for a matrix
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatOptions {
    /// Row- or column-major layout hint
    pub layout: Layout,
    /// Fraction of non-empty vectors below which storage counts as hypersparse
    pub hyper_switch: f64,
}

impl FormatOptions {
    /// Set the layout hint
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the hyper switch
    pub fn with_hyper_switch(mut self, hyper_switch: f64) -> Self {
        self.hyper_switch = hyper_switch;
        self
    }

    /// Whether a container with `nonempty` non-empty vectors out of `vdim`
    /// counts as hypersparse under these options
    pub fn is_hypersparse(&self, nonempty: usize, vdim: usize) -> bool {
        if self.hyper_switch >= ALWAYS_HYPER {
            return true;
        }
        if self.hyper_switch <= NEVER_HYPER || self.hyper_switch < 0.0 {
            return false;
        }
        (nonempty as f64) <= self.hyper_switch * vdim as f64
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            layout: Layout::ByRow,
            hyper_switch: DEFAULT_HYPER_SWITCH,
        }
    }
}
