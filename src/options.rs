use std::sync::Arc;

use crate::statistics::Statistics;

/// Where resolution resumes after a dead end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartPolicy {
    /// Advance the innermost wildcard level already entered.
    #[default]
    NearestWildcard,
    /// Re-resolve every wildcard level from the root using the stored cursors,
    /// then advance the innermost one.
    FromRoot,
}

#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub restart_policy: RestartPolicy,
    /// Counters to update while walking; `None` disables accounting
    pub statistics: Option<Arc<Statistics>>,
}

impl WalkOptions {
    pub fn with_statistics(statistics: Arc<Statistics>) -> Self {
        WalkOptions {
            statistics: Some(statistics),
            ..Default::default()
        }
    }
}
