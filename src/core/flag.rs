//! Message flags controlling mute, force and skip semantics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-message flag, consulted by every output the message reaches.
///
/// - `Force` bypasses the output's level filter.
/// - `Mute` prevents the final write; processors still run.
/// - `Skip` bypasses the processor chain, including the formatter.
/// - `SkipAndMute` with empty content is dropped before dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    #[default]
    None,
    Force,
    Mute,
    Skip,
    SkipAndForce,
    SkipAndMute,
}

impl Flag {
    #[inline]
    pub fn is_forced(&self) -> bool {
        matches!(self, Flag::Force | Flag::SkipAndForce)
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        matches!(self, Flag::Mute | Flag::SkipAndMute)
    }

    #[inline]
    pub fn skips_processing(&self) -> bool {
        matches!(self, Flag::Skip | Flag::SkipAndForce | Flag::SkipAndMute)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Flag::None => "none",
            Flag::Force => "force",
            Flag::Mute => "mute",
            Flag::Skip => "skip",
            Flag::SkipAndForce => "skipandforce",
            Flag::SkipAndMute => "skipandmute",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_predicates() {
        assert!(Flag::Force.is_forced());
        assert!(Flag::SkipAndForce.is_forced());
        assert!(!Flag::Skip.is_forced());

        assert!(Flag::Mute.is_muted());
        assert!(Flag::SkipAndMute.is_muted());
        assert!(!Flag::None.is_muted());

        assert!(Flag::Skip.skips_processing());
        assert!(Flag::SkipAndForce.skips_processing());
        assert!(!Flag::Force.skips_processing());
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(Flag::default(), Flag::None);
        assert_eq!(Flag::SkipAndForce.to_string(), "skipandforce");
    }
}
