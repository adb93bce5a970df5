//! Fixed-capacity entity pools
//!
//! Lasers, meteors and explosions all live in an [`EntityPool`]: a slot array
//! allocated once, an `active` flag per slot, and a [`RingCursor`] owned by the
//! caller that picks the next slot to (re)use.

use crate::tuning::Tuning;

/// What happens when the slot under the cursor is still live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolPolicy {
    /// Evict whatever occupies the cursor slot. O(1), bounded memory.
    #[default]
    OverwriteOldest,
    /// Use the first free slot at or after the cursor; drop the request if none.
    RejectIfFull,
}

/// Write position into a pool, advanced circularly on each activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RingCursor(usize);

impl RingCursor {
    pub fn new() -> Self {
        Self(0)
    }

    /// Slot the next activation will target
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }

    #[inline]
    fn after(slot: usize, capacity: usize) -> Self {
        Self((slot + 1) % capacity)
    }
}

/// Handle to one slot of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// An entity that lives in a pool slot
pub trait Pooled: Default {
    /// Parameters needed to bring a slot to life
    type Spawn;

    fn is_active(&self) -> bool;

    /// Mark the slot live and initialize it from `spawn`
    fn spawn(&mut self, spawn: Self::Spawn);

    /// Mark the slot free. Only called on active slots.
    fn retire(&mut self);

    /// Advance motion/animation by `dt` seconds
    fn advance(&mut self, dt: f32, tuning: &Tuning);

    /// End-of-life predicate checked after each advance
    fn expired(&self, tuning: &Tuning) -> bool;
}

/// Fixed-capacity slot array
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    slots: Box<[T]>,
    policy: PoolPolicy,
}

impl<T: Pooled> EntityPool<T> {
    /// Create a pool of `capacity` inactive slots
    pub fn new(capacity: usize, policy: PoolPolicy) -> Self {
        assert!(capacity > 0, "pool capacity must be at least 1");
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
            policy,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn policy(&self) -> PoolPolicy {
        self.policy
    }

    /// Bring the slot under `cursor` to life and return the advanced cursor.
    ///
    /// With [`PoolPolicy::OverwriteOldest`] the cursor slot is always used, even
    /// if it is live. With [`PoolPolicy::RejectIfFull`] a live cursor slot is
    /// skipped in favor of the next free one; when every slot is live nothing
    /// is activated and `cursor` comes back unchanged.
    pub fn activate(&mut self, cursor: RingCursor, spawn: T::Spawn) -> RingCursor {
        let mut cursor = cursor;
        self.try_activate(&mut cursor, spawn);
        cursor
    }

    /// Same as [`activate`](Self::activate), advancing `cursor` in place.
    ///
    /// Returns the slot that was brought to life, or `None` if the request was
    /// rejected. Only [`PoolPolicy::RejectIfFull`] rejects.
    pub fn try_activate(&mut self, cursor: &mut RingCursor, spawn: T::Spawn) -> Option<SlotId> {
        let capacity = self.capacity();
        let start = cursor.index() % capacity;

        let slot = match self.policy {
            PoolPolicy::OverwriteOldest => {
                if self.slots[start].is_active() {
                    log::debug!("Pool slot {start} evicted while live");
                }
                start
            }
            PoolPolicy::RejectIfFull => {
                let free = (0..capacity)
                    .map(|offset| (start + offset) % capacity)
                    .find(|&i| !self.slots[i].is_active());
                let Some(free) = free else {
                    log::trace!("Pool full ({capacity} live), activation rejected");
                    return None;
                };
                free
            }
        };

        self.slots[slot].spawn(spawn);
        *cursor = RingCursor::after(slot, capacity);
        Some(SlotId(slot))
    }

    /// Free a slot. Freeing an inactive slot does nothing.
    pub fn deactivate(&mut self, slot: SlotId) {
        if let Some(entity) = self.slots.get_mut(slot.0) {
            if entity.is_active() {
                entity.retire();
            }
        }
    }

    /// Advance every live slot and retire the ones that reached end of life.
    ///
    /// Visits all slots each call.
    pub fn update_all(&mut self, dt: f32, tuning: &Tuning) {
        for entity in self.slots.iter_mut() {
            if !entity.is_active() {
                continue;
            }
            entity.advance(dt, tuning);
            if entity.expired(tuning) {
                entity.retire();
            }
        }
    }

    pub fn get(&self, slot: SlotId) -> Option<&T> {
        self.slots.get(slot.0)
    }

    pub fn is_active(&self, slot: SlotId) -> bool {
        self.get(slot).is_some_and(|e| e.is_active())
    }

    /// Live slots in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_active())
            .map(|(i, e)| (SlotId(i), e))
    }

    /// Ids of live slots, for passes that mutate while scanning
    pub fn active_ids(&self) -> Vec<SlotId> {
        self.iter_active().map(|(id, _)| id).collect()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|e| e.is_active()).count()
    }
}
