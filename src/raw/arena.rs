use alloc::vec::Vec;

use super::handle::Handle;

#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Appends every slot of `other` after the slots of `self`.
    ///
    /// Returns the base offset: a handle `h` of `other` is `h.offset(base)` in `self`. Elements that
    /// store handles must be rewritten by the caller (see [`Arena::elements_from_mut`]).
    pub(crate) fn absorb(&mut self, other: Self) -> usize {
        let base = self.slots.len();
        assert!(
            base + other.slots.len() <= Handle::MAX + 1,
            "`Arena::absorb()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.extend(other.slots);
        self.free.extend(other.free.into_iter().map(|h| h.offset(base)));
        base
    }

    /// Iterates the occupied slots starting at slot index `base`.
    pub(crate) fn elements_from_mut(&mut self, base: usize) -> impl Iterator<Item = &mut T> {
        self.slots[base..].iter_mut().filter_map(Option::as_mut)
    }
}
