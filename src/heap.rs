use crate::Time;

/// A stable handle into a [`MinHeap`]. Survives sift-up/down; invalidated
/// only by [`MinHeap::remove`] or [`MinHeap::pop`] on the slot it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

const TOMBSTONE: usize = usize::MAX;

struct Slot<K> {
    time: Time,
    key: K,
    handle: Handle,
}

/// Mutable binary min-heap keyed by `(time, key)`, ordered by `time`
/// ascending. Maintains an indirection table from [`Handle`] to slot index
/// so that `decrease_key`/`increase_key`/`remove` run in O(log n) without
/// a linear scan, which a plain `std::collections::BinaryHeap` cannot do.
pub struct MinHeap<K> {
    slots: Vec<Slot<K>>,
    position: Vec<usize>,
    free: Vec<usize>,
}

impl<K: Copy> MinHeap<K> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            position: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn peek(&self) -> Option<(Time, K)> {
        self.slots.first().map(|s| (s.time, s.key))
    }

    /// Read the time of the entry at `handle` without removing it. The
    /// caller must not have removed `handle` already.
    pub fn time_at(&self, handle: Handle) -> Time {
        let idx = self.position[handle.0];
        assert_ne!(idx, TOMBSTONE, "time_at on a removed handle");
        self.slots[idx].time
    }

    /// Insert `(time, key)` and return a handle that can later be used to
    /// adjust or remove this exact entry.
    pub fn push(&mut self, time: Time, key: K) -> Handle {
        let handle = self.alloc_handle();
        let idx = self.slots.len();
        self.slots.push(Slot { time, key, handle });
        self.position[handle.0] = idx;
        self.sift_up(idx);
        handle
    }

    /// Remove and return the minimum entry, if any.
    pub fn pop(&mut self) -> Option<(Time, K)> {
        if self.slots.is_empty() {
            return None;
        }
        let last = self.slots.len() - 1;
        self.swap_slots(0, last);
        let popped = self.slots.pop().expect("checked nonempty above");
        self.position[popped.handle.0] = TOMBSTONE;
        self.free.push(popped.handle.0);
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        Some((popped.time, popped.key))
    }

    /// Change the time of the entry at `handle`, re-heapifying as needed.
    /// The caller must not have removed `handle` already.
    pub fn update(&mut self, handle: Handle, time: Time) {
        let idx = self.position[handle.0];
        assert_ne!(idx, TOMBSTONE, "update on a removed handle");
        let old = self.slots[idx].time;
        self.slots[idx].time = time;
        if time < old {
            self.sift_up(idx);
        } else if time > old {
            self.sift_down(idx);
        }
    }

    /// Remove the entry at `handle` regardless of its position, returning
    /// its `(time, key)`. Implemented as decrease-to-sentinel-then-pop per
    /// the usual indexed-heap trick.
    pub fn remove(&mut self, handle: Handle) -> (Time, K) {
        let idx = self.position[handle.0];
        assert_ne!(idx, TOMBSTONE, "remove on an already-removed handle");
        self.slots[idx].time = Time::NEG_INFINITY;
        self.sift_up(idx);
        debug_assert_eq!(self.position[handle.0], 0);
        self.pop().expect("just sifted a sentinel to the root")
    }

    fn alloc_handle(&mut self) -> Handle {
        match self.free.pop() {
            Some(id) => Handle(id),
            None => {
                let id = self.position.len();
                self.position.push(TOMBSTONE);
                Handle(id)
            }
        }
    }

    fn swap_slots(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
        self.position[self.slots[i].handle.0] = i;
        self.position[self.slots[j].handle.0] = j;
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.slots[idx].time < self.slots[parent].time {
                self.swap_slots(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.slots.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;
            if left < len && self.slots[left].time < self.slots[smallest].time {
                smallest = left;
            }
            if right < len && self.slots[right].time < self.slots[smallest].time {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.swap_slots(idx, smallest);
            idx = smallest;
        }
    }
}

impl<K: Copy> Default for MinHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}
