//! Enabled/disabled switch shared by loggers, outputs and processors

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Enabled,
    Disabled,
}

impl Status {
    #[inline]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Status::Enabled)
    }
}

/// Lock-free status cell, toggled at runtime through shared handles
#[derive(Debug)]
pub(crate) struct AtomicStatus(AtomicBool);

impl AtomicStatus {
    pub(crate) const fn new(status: Status) -> Self {
        Self(AtomicBool::new(matches!(status, Status::Enabled)))
    }

    #[inline]
    pub(crate) fn get(&self) -> Status {
        if self.0.load(Ordering::Acquire) {
            Status::Enabled
        } else {
            Status::Disabled
        }
    }

    #[inline]
    pub(crate) fn set(&self, status: Status) {
        self.0.store(status.is_enabled(), Ordering::Release);
    }
}
