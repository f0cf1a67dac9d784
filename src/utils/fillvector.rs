use std::ops::{Index, IndexMut};

// We use a u32 here instead of usize under the assumption there simply won't be that many entries
// and so that we can save some bytes in structs that use these indices.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FVIndex(pub u32);

enum Slot<V> {
    Occupied(V),
    Free,
}

/// A place to store (owned) values that can be accessed by an index, with holes being re-used.
/// Maintains a separate free list. A poor man's slot map or arena, really.
///
/// Indices stay stable for the lifetime of the value they were handed out for. Once a value is
/// freed its index may be handed out again by a later `add`.
pub struct FillVector<V> {
    values: Vec<Slot<V>>,
    free_list: Vec<u32>,
    size: usize,
}

impl<V> FillVector<V> {
    pub fn new() -> Self {
        Self {
            values: vec![],
            free_list: Vec::with_capacity(16),
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            free_list: Default::default(),
            size: 0,
        }
    }

    pub fn add<F: FnOnce(FVIndex) -> V>(&mut self, f: F) -> FVIndex {
        let id = match self.free_list.pop() {
            None => {
                let id = FVIndex(self.values.len() as u32);
                self.values.push(Slot::Occupied(f(id)));
                id
            }
            Some(idx) => {
                let id = FVIndex(idx);
                self.values[idx as usize] = Slot::Occupied(f(id));
                id
            }
        };
        self.size += 1;
        id
    }

    /// Remove the value at `id`, returning it. Returns `None` if the slot was already free.
    pub fn take(&mut self, id: FVIndex) -> Option<V> {
        let idx = id.0 as usize;
        if idx >= self.values.len() {
            return None;
        }
        let Slot::Occupied(value) = std::mem::replace(&mut self.values[idx], Slot::Free) else {
            return None;
        };

        // Trailing slots are popped rather than put on the free list, so the vector shrinks
        // back when the most recently added values go away first.
        if idx == self.values.len() - 1 {
            self.values.pop();
        } else {
            self.free_list.push(id.0);
        }
        self.size -= 1;
        Some(value)
    }

    pub fn free(&mut self, id: FVIndex) -> bool {
        self.take(id).is_some()
    }

    pub fn get(&self, id: FVIndex) -> Option<&V> {
        match self.values.get(id.0 as usize) {
            Some(Slot::Occupied(v)) => Some(v),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.free_list.clear();
        self.size = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<V> Index<FVIndex> for FillVector<V> {
    type Output = V;

    fn index(&self, index: FVIndex) -> &Self::Output {
        match &self.values[index.0 as usize] {
            Slot::Occupied(v) => v,
            Slot::Free => panic!("access to freed slot {}", index.0),
        }
    }
}

impl<V> IndexMut<FVIndex> for FillVector<V> {
    fn index_mut(&mut self, index: FVIndex) -> &mut Self::Output {
        match &mut self.values[index.0 as usize] {
            Slot::Occupied(v) => v,
            Slot::Free => panic!("access to freed slot {}", index.0),
        }
    }
}

impl<V> Default for FillVector<V> {
    fn default() -> Self {
        Self::new()
    }
}
