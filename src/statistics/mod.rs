use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Walk statistics
///
/// Thread-safe counters shared by every iterator created with the same
/// `WalkOptions`. Uses atomic counters for lock-free updates.
#[derive(Debug, Default)]
pub struct Statistics {
    // Iterator lifecycle
    pub num_walks: AtomicU64,
    pub num_values_yielded: AtomicU64,
    pub num_exhausted: AtomicU64,

    // Resolution
    pub num_lookups: AtomicU64,
    pub num_entries_scanned: AtomicU64,
    pub num_dead_ends: AtomicU64,

    // Backtracking
    pub num_carries: AtomicU64,
    pub num_rebuilds: AtomicU64,
}

/// Point-in-time copy of [`Statistics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsSnapshot {
    pub walks: u64,
    pub values_yielded: u64,
    pub exhausted: u64,
    pub lookups: u64,
    pub entries_scanned: u64,
    pub dead_ends: u64,
    pub carries: u64,
    pub rebuilds: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    #[inline]
    pub fn record_walk(&self) {
        self.num_walks.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_value(&self) {
        self.num_values_yielded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_exhausted(&self) {
        self.num_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lookup(&self) {
        self.num_lookups.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_entry_scanned(&self) {
        self.num_entries_scanned.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dead_end(&self) {
        self.num_dead_ends.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_carry(&self) {
        self.num_carries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rebuild(&self) {
        self.num_rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn num_values_yielded(&self) -> u64 {
        self.num_values_yielded.load(Ordering::Relaxed)
    }

    pub fn num_dead_ends(&self) -> u64 {
        self.num_dead_ends.load(Ordering::Relaxed)
    }

    /// Fraction of resolution attempts that ended in a dead end
    pub fn dead_end_rate(&self) -> f64 {
        let dead = self.num_dead_ends.load(Ordering::Relaxed) as f64;
        let total = dead + self.num_values_yielded.load(Ordering::Relaxed) as f64;
        if total > 0.0 { dead / total } else { 0.0 }
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            walks: self.num_walks.load(Ordering::Relaxed),
            values_yielded: self.num_values_yielded.load(Ordering::Relaxed),
            exhausted: self.num_exhausted.load(Ordering::Relaxed),
            lookups: self.num_lookups.load(Ordering::Relaxed),
            entries_scanned: self.num_entries_scanned.load(Ordering::Relaxed),
            dead_ends: self.num_dead_ends.load(Ordering::Relaxed),
            carries: self.num_carries.load(Ordering::Relaxed),
            rebuilds: self.num_rebuilds.load(Ordering::Relaxed),
        }
    }

    /// Reset all statistics to zero
    pub fn reset(&self) {
        self.num_walks.store(0, Ordering::Relaxed);
        self.num_values_yielded.store(0, Ordering::Relaxed);
        self.num_exhausted.store(0, Ordering::Relaxed);
        self.num_lookups.store(0, Ordering::Relaxed);
        self.num_entries_scanned.store(0, Ordering::Relaxed);
        self.num_dead_ends.store(0, Ordering::Relaxed);
        self.num_carries.store(0, Ordering::Relaxed);
        self.num_rebuilds.store(0, Ordering::Relaxed);
    }

    /// Get a formatted statistics report
    pub fn report(&self) -> String {
        let s = self.snapshot();
        format!(
            "Walk Statistics:\n\
            \n\
            Iterators:\n\
            - Walks:           {}\n\
            - Values yielded:  {}\n\
            - Exhausted:       {}\n\
            \n\
            Resolution:\n\
            - Lookups:         {}\n\
            - Entries scanned: {}\n\
            - Dead ends:       {}\n\
            - Dead end rate:   {:.2}%\n\
            \n\
            Backtracking:\n\
            - Carries:         {}\n\
            - Rebuilds:        {}",
            s.walks,
            s.values_yielded,
            s.exhausted,
            s.lookups,
            s.entries_scanned,
            s.dead_ends,
            self.dead_end_rate() * 100.0,
            s.carries,
            s.rebuilds,
        )
    }
}
