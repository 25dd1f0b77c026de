//! Free-list entity pool.
//!
//! # Why a free list (and not swap-compact)
//! Handles cross the event queue: a `Release` can be queued in one pass and applied
//! later. A swap-compacting pool would silently move another live entity into the
//! released index. Here a slot index never changes owner until *that* slot is
//! released, so a queued handle either still names its entity or is stale and
//! rejected.
//!
//! ```text
//!   slots:      [ A | . | C | . | E ]        . = free
//!   free_head:  3 -> 1 -> END
//!
//!   acquire(x)  pops 3, rebuilds it in place      (no allocation)
//!   acquire(y)  pops 1, rebuilds it in place
//!   acquire(z)  free list empty -> push a new slot (capacity grows)
//!   release(2)  pushes 2 onto the free list
//! ```
//!
//! All operations are total: stale or out-of-range handles are ignored.

use bevy::log::debug;

/// Opaque slot handle issued by [`Pool::acquire`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Construction protocol for pooled values.
///
/// `create` builds fresh storage; `rebuild` re-initializes a recycled slot in place.
pub trait Poolable {
    type Args;

    fn create(args: Self::Args) -> Self;

    fn rebuild(&mut self, args: Self::Args);
}

#[derive(Debug)]
struct Slot<T> {
    value: T,
    occupied: bool,
    next_free: Option<usize>,
}

#[derive(Debug)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    active: usize,
    label: &'static str,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new("pool")
    }
}

impl<T> Pool<T> {
    /// `label` only tags log lines.
    pub fn new(label: &'static str) -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            active: 0,
            label,
        }
    }

    /// Backing-storage size. Never shrinks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn is_active(&self, id: SlotId) -> bool {
        self.slots.get(id.0).is_some_and(|s| s.occupied)
    }

    /// Return a slot to the free list. Returns `false` (and does nothing) when
    /// `id` is out of range or already free.
    pub fn release(&mut self, id: SlotId) -> bool {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return false;
        };
        if !slot.occupied {
            return false;
        }

        slot.occupied = false;
        slot.next_free = self.free_head;
        self.free_head = Some(id.0);
        self.active -= 1;
        true
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.0)
            .filter(|s| s.occupied)
            .map(|s| &s.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .filter(|s| s.occupied)
            .map(|s| &mut s.value)
    }

    /// Live slots in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.occupied)
            .map(|(i, s)| (SlotId(i), &s.value))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.occupied)
            .map(|(i, s)| (SlotId(i), &mut s.value))
    }
}

impl<T: Poolable> Pool<T> {
    /// Hand out a live slot: recycle the free-list head, or append. O(1) amortized.
    pub fn acquire(&mut self, args: T::Args) -> SlotId {
        self.active += 1;

        if let Some(idx) = self.free_head {
            let slot = &mut self.slots[idx];
            self.free_head = slot.next_free.take();
            slot.occupied = true;
            slot.value.rebuild(args);
            return SlotId(idx);
        }

        self.slots.push(Slot {
            value: T::create(args),
            occupied: true,
            next_free: None,
        });
        debug!("{} pool grew to {} slots", self.label, self.slots.len());
        SlotId(self.slots.len() - 1)
    }
}
