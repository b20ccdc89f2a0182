//! Per-logger severity bumping
//!
//! A [`LevelBumpPolicy`] raises the severity of records emitted by specific
//! logger names by a configured offset, clamped at [`MAX_SEVERITY`]. The
//! active policy is process-wide state consulted once per record, at record
//! creation, before any appender-level filtering or formatting sees the
//! record; downstream severity filters therefore observe the bumped value.
//!
//! Installation publishes the whole offset map atomically. Readers observe
//! either the previous policy or the new one in full, never a partial map,
//! and the last install wins outright (offset maps are never merged).

use super::error::{LoggerError, Result};
use super::log_level::{Severity, MAX_SEVERITY};
use arc_swap::ArcSwapOption;
use std::collections::HashMap;
use std::sync::Arc;

static ACTIVE: ArcSwapOption<LevelBumpPolicy> = ArcSwapOption::const_empty();

/// Mapping from logger name (exact match) to a non-negative severity offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelBumpPolicy {
    offsets: HashMap<String, Severity>,
}

impl LevelBumpPolicy {
    /// Create an empty policy. Installing it restores default record
    /// creation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a policy from an offset map.
    ///
    /// Rejects negative offsets: the policy only ever raises severity.
    pub fn from_offsets<K>(offsets: impl IntoIterator<Item = (K, Severity)>) -> Result<Self>
    where
        K: Into<String>,
    {
        let mut map = HashMap::new();
        for (name, offset) in offsets {
            let name = name.into();
            if offset < 0 {
                return Err(LoggerError::config(
                    "LevelBumpPolicy",
                    format!("offset for '{}' is negative ({})", name, offset),
                ));
            }
            map.insert(name, offset);
        }
        Ok(Self { offsets: map })
    }

    /// The offset configured for `name`, or 0 if absent.
    pub fn offset(&self, name: &str) -> Severity {
        self.offsets.get(name).copied().unwrap_or(0)
    }

    /// The effective severity for a record: `min(severity + offset(name),
    /// MAX_SEVERITY)`.
    pub fn apply(&self, name: &str, severity: Severity) -> Severity {
        (severity + self.offset(name)).min(MAX_SEVERITY)
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Install `policy` as the process-wide bump policy.
///
/// Replaces any previously installed policy in its entirety. An empty policy
/// leaves default record creation in place (nothing is consulted per record)
/// rather than installing a no-op.
pub fn install(policy: LevelBumpPolicy) {
    if policy.is_empty() {
        ACTIVE.store(None);
    } else {
        ACTIVE.store(Some(Arc::new(policy)));
    }
}

/// Remove any installed bump policy, restoring default record creation.
pub fn uninstall() {
    ACTIVE.store(None);
}

/// Whether a bump policy is currently active.
pub fn is_installed() -> bool {
    ACTIVE.load().is_some()
}

/// The severity a record for `name` should carry, given the active policy.
///
/// This is the record-creation interception point: loggers call it once per
/// accepted record. With no policy installed it returns `severity` untouched.
pub fn effective_severity(name: &str, severity: Severity) -> Severity {
    match &*ACTIVE.load() {
        Some(policy) => policy.apply(name, severity),
        None => severity,
    }
}
