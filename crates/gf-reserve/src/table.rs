//! The `ReservationTable`: last-claim timestamp per grid cell.

use gf_core::{Cell, SimTime};

#[cfg(feature = "fx-hash")]
type CellMap<V> = rustc_hash::FxHashMap<Cell, V>;
#[cfg(not(feature = "fx-hash"))]
type CellMap<V> = std::collections::HashMap<Cell, V>;

/// Map from cell to the timestamp of its most recent claim.
///
/// One entry per cell; a later [`reserve`](Self::reserve) overwrites the
/// earlier one.  Insertion order is irrelevant.
#[derive(Debug, Clone)]
pub struct ReservationTable {
    /// Seconds a claim keeps its cell unavailable (`global_time_step`).
    window:  f64,
    entries: CellMap<SimTime>,
}

impl ReservationTable {
    /// Create an empty table whose claims last `global_time_step` seconds.
    pub fn new(global_time_step: f64) -> Self {
        Self {
            window:  global_time_step,
            entries: CellMap::default(),
        }
    }

    /// The reservation window (`global_time_step`) in seconds.
    #[inline]
    pub fn window(&self) -> f64 {
        self.window
    }

    /// `true` if `cell` has no entry or its last claim is strictly more than
    /// one window older than `now`.  Never mutates the table.
    #[inline]
    pub fn is_available(&self, cell: Cell, now: SimTime) -> bool {
        match self.entries.get(&cell) {
            None          => true,
            Some(&stamp)  => now - stamp > self.window,
        }
    }

    /// Claim `cell` at `now`, overwriting any earlier claim.
    pub fn reserve(&mut self, cell: Cell, now: SimTime) {
        let previous = self.entries.insert(cell, now);
        debug_assert!(
            previous.is_none_or(|p| p <= now),
            "reservation for {cell} written at {now}, earlier than existing {previous:?}"
        );
        tracing::trace!(%cell, %now, "cell reserved");
    }

    /// Drop every claim older than `2 × window` at `now`.  Claims within that
    /// horizon are left untouched.  Returns the number of entries removed.
    pub fn cleanup(&mut self, now: SimTime) -> usize {
        let horizon = 2.0 * self.window;
        let before  = self.entries.len();
        self.entries.retain(|_, stamp| now - *stamp <= horizon);
        before - self.entries.len()
    }

    /// Timestamp of the last claim on `cell`, if any entry remains.
    #[inline]
    pub fn reserved_at(&self, cell: Cell) -> Option<SimTime> {
        self.entries.get(&cell).copied()
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(cell, timestamp)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, SimTime)> + '_ {
        self.entries.iter().map(|(&c, &t)| (c, t))
    }

    /// Remove every entry.  Part of the simulation reset; never called
    /// implicitly.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
