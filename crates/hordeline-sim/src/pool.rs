//! Bounded object pool with a rotating free-slot cursor.
//!
//! Slots are allocated lazily up to the configured capacity and reused
//! forever after. Acquisition past capacity yields `None`; callers treat
//! that as a dropped emission, not an error.

/// A value that can live in a `Pool`.
pub trait Poolable {
    /// Parameters that fully describe a fresh instance.
    type Spec;

    /// Build a fresh, active instance. Reuse goes through this too, so no
    /// field of a previous occupant survives.
    fn from_spec(spec: &Self::Spec) -> Self;

    fn is_active(&self) -> bool;
}

/// Index of an occupied pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolHandle(pub usize);

#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Poolable> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            cursor: 0,
            capacity,
        }
    }

    /// Claim an inactive slot, scanning from the cursor, and overwrite it
    /// from `spec`. Grows the store while below capacity.
    pub fn acquire(&mut self, spec: &T::Spec) -> Option<PoolHandle> {
        let len = self.slots.len();
        for i in 0..len {
            let idx = (self.cursor + i) % len;
            if !self.slots[idx].is_active() {
                self.slots[idx] = T::from_spec(spec);
                self.cursor = (idx + 1) % len;
                return Some(PoolHandle(idx));
            }
        }

        if len < self.capacity {
            self.slots.push(T::from_spec(spec));
            self.cursor = 0;
            return Some(PoolHandle(len));
        }
        None
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots.get_mut(handle.0)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|s| s.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// True when no slot is in use.
    pub fn is_idle(&self) -> bool {
        !self.slots.iter().any(|s| s.is_active())
    }

    /// Slots allocated so far.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
