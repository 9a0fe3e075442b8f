use alloc::vec::Vec;

use super::handle::Handle;

enum Slot<T> {
    Occupied(T),
    /// A freed slot, linking to the next free slot.
    Vacant(Option<Handle>),
}

/// Slot storage for tree nodes.
///
/// Freed slots form an intrusive singly linked list and are reused before
/// the backing vector grows, so handles stay small and stable for the
/// lifetime of the element they name.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    next_free: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_free: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            next_free: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        let handle = if let Some(handle) = self.next_free {
            let slot = &mut self.slots[handle.index()];
            let Slot::Vacant(next) = *slot else {
                panic!("`Arena::alloc()` - free list points at an occupied slot!");
            };
            self.next_free = next;
            *slot = Slot::Occupied(element);
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot::Occupied(element));
            Handle::from_index(self.slots.len() - 1)
        };
        self.len += 1;
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get()` - `handle` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = core::mem::replace(&mut self.slots[handle.index()], Slot::Vacant(self.next_free));
        match slot {
            Slot::Occupied(element) => {
                self.next_free = Some(handle);
                self.len -= 1;
                element
            }
            Slot::Vacant(next) => {
                self.slots[handle.index()] = Slot::Vacant(next);
                panic!("`Arena::take()` - `handle` is invalid!");
            }
        }
    }

    /// Drops every element and forgets all handles.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.next_free = None;
        self.len = 0;
    }

    /// Releases unused capacity. Only compacts when no slot is vacant, since
    /// live handles must keep their indices.
    pub(crate) fn shrink_to_fit(&mut self) {
        if self.next_free.is_none() {
            self.slots.shrink_to_fit();
        }
    }
}
