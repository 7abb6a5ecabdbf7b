use std::mem;
use std::num::NonZeroUsize;
use std::ops::{Index, IndexMut};

#[cfg(test)]
use static_assertions::const_assert_eq;

/// An index into a slab
///
/// Stored as `index + 1` so that `Option<Ptr>` has the same size as a plain `usize`. Every link in
/// the tree is an `Option<Ptr>`, so this keeps each node as small as possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ptr(NonZeroUsize);

#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<Ptr>>(), mem::size_of::<usize>());

impl Ptr {
    #[inline(always)]
    fn from_index(index: usize) -> Self {
        // `index + 1` can only overflow if the slab already holds `usize::MAX` entries
        match index.checked_add(1).and_then(NonZeroUsize::new) {
            Some(raw) => Ptr(raw),
            None => panic!("cannot have more than usize::MAX - 1 entries in slab"),
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0.get() - 1
    }
}

#[derive(Debug)]
enum Entry<T> {
    Occupied(T),
    /// A removed entry, linked into the free list
    Vacant {
        /// The next entry in the free list or `None` if this is the last one
        next: Option<Ptr>,
    },
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space from removed entries.
///
/// Pointers are never shifted when an individual item is removed. Instead of always pushing items
/// after the previously pushed item, the slab reuses space from previously removed entries when
/// possible.
///
/// Indexing with a pointer to a removed entry panics. The tree only ever holds pointers to live
/// nodes, so hitting that panic means a link was left dangling.
#[derive(Debug)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    /// The first entry in the free list or `None` if the free list is empty
    ///
    /// The free list is used as a stack to track which entries can be reused by `push`.
    free_head: Option<Ptr>,
    /// The number of occupied entries
    len: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            len: 0,
        }
    }
}

impl<T> Slab<T> {
    /// Creates an empty slab
    ///
    /// The slab is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slab with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of entries in the slab that contain values
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the slab can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn get(&self, ptr: Ptr) -> Option<&T> {
        match self.entries.get(ptr.index()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, ptr: Ptr) -> Option<&mut T> {
        match self.entries.get_mut(ptr.index()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns mutable references to two distinct occupied entries
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or if either pointer does not refer to an occupied entry.
    pub fn get2_mut(&mut self, a: Ptr, b: Ptr) -> (&mut T, &mut T) {
        let (a, b) = (a.index(), b.index());
        assert_ne!(a, b, "bug: requested two mutable references to the same slab entry");

        let (first, second) = if a < b {
            let (head, tail) = self.entries.split_at_mut(b);
            (&mut head[a], &mut tail[0])
        } else {
            let (head, tail) = self.entries.split_at_mut(a);
            (&mut tail[0], &mut head[b])
        };

        match (first, second) {
            (Entry::Occupied(first), Entry::Occupied(second)) => (first, second),
            _ => panic!("bug: slab pointer refers to a removed entry"),
        }
    }

    /// Pushes a value into the slab and returns a pointer to it.
    ///
    /// The item may be placed at the end of the list, or in the space of a previously removed
    /// item.
    pub fn push(&mut self, value: T) -> Ptr {
        self.len += 1;

        // Check if we can reuse some space from the free list
        if let Some(free_head) = self.free_head {
            let entry = &mut self.entries[free_head.index()];
            let next = match *entry {
                Entry::Vacant {next} => next,
                Entry::Occupied(_) => unreachable!("bug: free list points to an occupied entry"),
            };
            self.free_head = next;
            *entry = Entry::Occupied(value);

            return free_head;
        }

        let ptr = Ptr::from_index(self.entries.len());
        self.entries.push(Entry::Occupied(value));
        ptr
    }

    /// Removes an item from the slab, returning its value.
    ///
    /// The space for the item will be reused in future calls to `push`. Other pointers into the
    /// slab remain valid.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` does not refer to an occupied entry.
    pub fn remove(&mut self, ptr: Ptr) -> T {
        let entry = &mut self.entries[ptr.index()];
        if let Entry::Vacant {..} = entry {
            panic!("bug: attempt to remove an entry that was already removed");
        }

        let prev = mem::replace(entry, Entry::Vacant {next: self.free_head});
        self.free_head = Some(ptr);
        self.len -= 1;

        match prev {
            Entry::Occupied(value) => value,
            Entry::Vacant {..} => unreachable!(),
        }
    }

    /// Clears the slab, removing all values. Has no effect on the allocated capacity.
    ///
    /// This invalidates all previous pointers returned from `push`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_head = None;
        self.len = 0;
    }

    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional)
    }

    /// Shrinks the capacity as much as possible.
    ///
    /// Trailing removed entries are dropped first so the capacity can actually go down. The free
    /// list is rebuilt from whatever vacant entries remain.
    pub fn shrink_to_fit(&mut self) {
        while let Some(Entry::Vacant {..}) = self.entries.last() {
            self.entries.pop();
        }

        self.free_head = None;
        for index in (0..self.entries.len()).rev() {
            if let Entry::Vacant {next} = &mut self.entries[index] {
                *next = self.free_head;
                self.free_head = Some(Ptr::from_index(index));
            }
        }

        self.entries.shrink_to_fit()
    }
}

impl<T> Index<Ptr> for Slab<T> {
    type Output = T;

    fn index(&self, ptr: Ptr) -> &T {
        match self.get(ptr) {
            Some(value) => value,
            None => panic!("bug: slab pointer {} refers to a removed entry", ptr.index()),
        }
    }
}

impl<T> IndexMut<Ptr> for Slab<T> {
    fn index_mut(&mut self, ptr: Ptr) -> &mut T {
        match self.get_mut(ptr) {
            Some(value) => value,
            None => panic!("bug: slab pointer {} refers to a removed entry", ptr.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ptr_api() {
        assert_eq!(Ptr::from_index(0).index(), 0);
        assert_eq!(Ptr::from_index(1).index(), 1);
        assert_eq!(Ptr::from_index(5).index(), 5);
        assert_ne!(Ptr::from_index(0), Ptr::from_index(1));
    }

    #[test]
    fn slab_push_remove() {
        let mut slab = Slab::new();

        assert_eq!(slab.len(), 0);
        assert!(slab.is_empty());
        assert_eq!(slab.capacity(), 0);

        let ptr0 = slab.push(19384);
        assert_eq!(slab[ptr0], 19384);
        assert_eq!(slab.len(), 1);
        assert!(!slab.is_empty());

        // Remove the only value in the slab
        assert_eq!(slab.remove(ptr0), 19384);
        assert!(slab.is_empty());
        assert_eq!(slab.get(ptr0), None);

        // The removed space is reused
        let ptr0 = slab.push(831783);
        let ptr1 = slab.push(57);
        assert_eq!(slab[ptr0], 831783);
        assert_eq!(slab[ptr1], 57);
        assert_eq!(slab.len(), 2);

        // Removing the first value leaves the second at the same pointer
        assert_eq!(slab.remove(ptr0), 831783);
        assert_eq!(slab[ptr1], 57);

        let ptr2 = slab.push(999);
        assert_eq!(ptr2, ptr0);
        assert_eq!(slab[ptr1], 57);
        assert_eq!(slab[ptr2], 999);
        assert_eq!(slab.len(), 2);
    }

    #[test]
    fn slab_stable_get() {
        let mut slab = Slab::default();

        let ptr0 = slab.push(-12);

        // Push enough values for the capacity to change a few times
        let initial_capacity = slab.capacity();
        let mut ptrs = Vec::new();
        for i in 0.. {
            ptrs.push(slab.push(i as i32));
            if slab.capacity() >= initial_capacity * 5 {
                break;
            }
        }

        // pointers returned from push remain usable even if the capacity changes
        assert_eq!(slab[ptr0], -12);
        for (i, &ptr) in ptrs.iter().enumerate() {
            assert_eq!(slab[ptr], i as i32);
        }

        slab.shrink_to_fit();
        assert_eq!(slab.len(), slab.capacity());
        assert_eq!(slab[ptr0], -12);

        slab[ptr0] *= -1;
        for &ptr in &ptrs {
            slab[ptr] *= -1;
        }

        assert_eq!(slab[ptr0], 12);
        for (i, &ptr) in ptrs.iter().enumerate() {
            assert_eq!(slab[ptr], i as i32 * -1);
        }
    }

    #[test]
    fn slab_get2_mut() {
        let mut slab = Slab::new();
        let a = slab.push("a".to_string());
        let b = slab.push("b".to_string());

        let (x, y) = slab.get2_mut(b, a);
        mem::swap(x, y);

        assert_eq!(slab[a], "b");
        assert_eq!(slab[b], "a");
    }

    #[test]
    #[should_panic(expected = "same slab entry")]
    fn slab_get2_mut_aliasing() {
        let mut slab = Slab::new();
        let a = slab.push(1);
        slab.get2_mut(a, a);
    }

    #[test]
    #[should_panic(expected = "removed entry")]
    fn slab_index_removed() {
        let mut slab = Slab::new();
        let a = slab.push(1);
        slab.push(2);
        slab.remove(a);
        let _ = slab[a];
    }

    #[test]
    fn slab_clear() {
        let mut slab: Slab<String> = Slab::new();

        slab.push("abc".to_string());
        let capacity = slab.capacity();

        slab.clear();
        assert!(slab.is_empty());
        assert_eq!(slab.capacity(), capacity);

        // push 2 values and remove one, so that clear has to account for the free list
        let ptr = slab.push("ddd".to_string());
        slab.push("fff".to_string());
        slab.remove(ptr);

        slab.clear();
        assert!(slab.is_empty());

        // the free list was reset, so pushing starts from the front again
        let ptr = slab.push("qqq".to_string());
        assert_eq!(ptr.index(), 0);
    }

    #[test]
    fn slab_shrink_rebuilds_free_list() {
        let mut slab = Slab::new();
        let ptrs: Vec<_> = (0..8).map(|i| slab.push(i)).collect();

        // Remove one entry in the middle and the last two
        slab.remove(ptrs[3]);
        slab.remove(ptrs[6]);
        slab.remove(ptrs[7]);

        slab.shrink_to_fit();
        assert_eq!(slab.len(), 5);
        assert!(slab.capacity() >= 6);

        // The hole in the middle is reused before growing
        assert_eq!(slab.push(100), ptrs[3]);
        assert_eq!(slab.push(101).index(), 6);
    }

    #[test]
    fn drop_removed() {
        use std::sync::Arc;

        let mut slab = Slab::new();

        let value1 = Arc::new(1);
        let value2 = Arc::new(2);
        let weak_ref1 = Arc::downgrade(&value1);
        let weak_ref2 = Arc::downgrade(&value2);

        let ptr0 = slab.push(value1);
        slab.push(value2);

        drop(slab.remove(ptr0));
        assert!(weak_ref1.upgrade().is_none());
        assert_eq!(*weak_ref2.upgrade().unwrap(), 2);

        drop(slab);
        assert!(weak_ref2.upgrade().is_none());
    }
}
