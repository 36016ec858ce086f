//! Colorbar slot bookkeeping.
//!
//! A plotting session can show at most [`MAX_COLOR_BARS`] scalar bars at once.
//! Each distinct title holds exactly one slot until the session is cleared,
//! and meshes that share a title share one range: every new range is merged
//! into the stored one and pushed back out to all mappers bound to it.
//! Untitled bars hold a slot of their own and never share.

use std::collections::{BTreeSet, HashMap};

use crate::error::{MeshplotError, Result};
use crate::mapper::{MapperHandle, ScalarRange};
use crate::theme::ColorbarLayout;

/// Maximum number of concurrently displayed colorbars.
pub const MAX_COLOR_BARS: usize = 10;

/// Scalar bar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Bookkeeping for one colorbar title.
#[derive(Debug, Clone)]
pub struct ColorbarEntry {
    slot: usize,
    range: Option<ScalarRange>,
    mappers: Vec<MapperHandle>,
}

impl ColorbarEntry {
    /// Returns the held slot.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Returns the merged range, or `None` while only reserved.
    pub fn range(&self) -> Option<ScalarRange> {
        self.range
    }

    /// Returns the mappers bound to this title.
    pub fn mappers(&self) -> &[MapperHandle] {
        &self.mappers
    }

    /// Returns true once a range has been recorded.
    pub fn is_active(&self) -> bool {
        self.range.is_some()
    }
}

/// Allocates colorbar slots and keeps per-title ranges consistent.
#[derive(Debug, Clone)]
pub struct ColorbarSlotManager {
    capacity: usize,
    free: BTreeSet<usize>,
    entries: HashMap<String, ColorbarEntry>,
    untitled: Vec<usize>,
}

impl Default for ColorbarSlotManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorbarSlotManager {
    /// Creates a manager with [`MAX_COLOR_BARS`] slots.
    pub fn new() -> Self {
        Self::with_capacity(MAX_COLOR_BARS)
    }

    /// Creates a manager with a custom number of slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            free: (0..capacity).collect(),
            entries: HashMap::new(),
            untitled: Vec::new(),
        }
    }

    /// Returns the total number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of unallocated slots.
    pub fn free_slots(&self) -> usize {
        self.free.len()
    }

    /// Returns the number of titles holding a slot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no title holds a slot.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the slots held by untitled bars, in acquisition order.
    pub fn untitled_slots(&self) -> &[usize] {
        &self.untitled
    }

    /// Returns whether `title` holds a slot.
    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Returns the entry for `title`.
    pub fn entry(&self, title: &str) -> Option<&ColorbarEntry> {
        self.entries.get(title)
    }

    /// Returns the slot held by `title`.
    pub fn slot_of(&self, title: &str) -> Option<usize> {
        self.entries.get(title).map(ColorbarEntry::slot)
    }

    /// Returns the merged range for `title`.
    pub fn range_of(&self, title: &str) -> Option<ScalarRange> {
        self.entries.get(title).and_then(ColorbarEntry::range)
    }

    /// Returns the mappers bound to `title`.
    pub fn mappers_of(&self, title: &str) -> &[MapperHandle] {
        match self.entries.get(title) {
            Some(entry) => &entry.mappers,
            None => &[],
        }
    }

    /// Reserves a slot for `title`.
    ///
    /// A title that already holds a slot gets the same slot back and nothing
    /// is allocated. Otherwise the smallest free slot is taken.
    pub fn acquire(&mut self, title: &str) -> Result<usize> {
        if let Some(entry) = self.entries.get(title) {
            return Ok(entry.slot);
        }
        let slot = self
            .free
            .pop_first()
            .ok_or(MeshplotError::ColorbarCapacityExceeded {
                capacity: self.capacity,
            })?;
        self.entries.insert(
            title.to_string(),
            ColorbarEntry {
                slot,
                range: None,
                mappers: Vec::new(),
            },
        );
        log::debug!("colorbar '{title}' reserved slot {slot}");
        Ok(slot)
    }

    /// Reserves the smallest free slot for a bar without a title.
    ///
    /// Untitled reservations are not keyed, so no title can ever resolve to
    /// one of them.
    pub fn acquire_untitled(&mut self) -> Result<usize> {
        let slot = self
            .free
            .pop_first()
            .ok_or(MeshplotError::ColorbarCapacityExceeded {
                capacity: self.capacity,
            })?;
        self.untitled.push(slot);
        log::debug!("untitled colorbar reserved slot {slot}");
        Ok(slot)
    }

    /// Binds a mapper to `title`, acquiring a slot if needed.
    ///
    /// If the title already has a range, the mapper is set to it.
    pub fn attach_mapper(&mut self, title: &str, mapper: MapperHandle) -> Result<()> {
        self.acquire(title)?;
        let Some(entry) = self.entries.get_mut(title) else {
            return Ok(());
        };
        if entry.mappers.iter().any(|m| m.same_mapper(&mapper)) {
            return Ok(());
        }
        if let Some(range) = entry.range {
            mapper.set_scalar_range(range.min, range.max);
        }
        entry.mappers.push(mapper);
        Ok(())
    }

    /// Merges `range` into the stored range for `title` and applies the result
    /// to every bound mapper.
    ///
    /// The first range recorded for a title is stored as-is. Unknown titles
    /// are acquired first. The merged range never shrinks.
    pub fn merge_range(&mut self, title: &str, range: ScalarRange) -> Result<ScalarRange> {
        self.acquire(title)?;
        let Some(entry) = self.entries.get_mut(title) else {
            return Ok(range);
        };
        let merged = entry.range.map_or(range, |old| old.union(&range));
        for mapper in &entry.mappers {
            mapper.set_scalar_range(merged.min, merged.max);
        }
        entry.range = Some(merged);
        log::debug!("colorbar '{title}' range {merged}");
        Ok(merged)
    }

    /// Frees every slot and forgets every title.
    pub fn release_all(&mut self) {
        self.free = (0..self.capacity).collect();
        self.entries.clear();
        self.untitled.clear();
    }
}

/// Maps a slot to the lower-left corner of its scalar bar in normalized
/// viewport coordinates.
///
/// Horizontal bars stack leftward by one bar width per slot; vertical bars
/// stack upward by one bar height per slot. A bar whose far edge would leave
/// the viewport is shifted back by its own size.
#[allow(clippy::cast_precision_loss)]
pub fn slot_position(slot: usize, orientation: Orientation, layout: &ColorbarLayout) -> (f32, f32) {
    let offset = slot as f32;
    let (x, y) = match orientation {
        Orientation::Horizontal => (layout.position_x - offset * layout.width, layout.position_y),
        Orientation::Vertical => (layout.position_x, layout.position_y + offset * layout.height),
    };
    clamp_to_viewport(x, y, layout.width, layout.height)
}

/// Shifts a bar back by its own size along each axis where it would extend past 1.
pub fn clamp_to_viewport(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    let x = if x + width > 1.0 { x - width } else { x };
    let y = if y + height > 1.0 { y - height } else { y };
    (x, y)
}
