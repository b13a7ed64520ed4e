//! Fixed-capacity ring buffer holding the pending lag partners.
//!
//! The window grows while the traversal is filling and then rotates in
//! place: every steady-state step hands back the oldest element and stores
//! the newest one in its slot, so memory stays at `capacity` elements no
//! matter how long the source runs.

/// Ring buffer of the most recent `capacity` source elements, oldest first.
///
/// ```
/// use lagstream_operators::window::LagWindow;
///
/// let mut window = LagWindow::new(2);
/// assert_eq!(window.advance(&1, &0), 0);
/// assert_eq!(window.advance(&2, &0), 0);
/// assert!(window.is_full());
///
/// // Full: the oldest element comes back out.
/// assert_eq!(window.advance(&3, &0), 1);
/// assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct LagWindow<T> {
    slots: Vec<T>,
    /// Index of the oldest element once the window is full.
    head: usize,
    capacity: usize,
}

impl<T> LagWindow<T> {
    /// # Panics
    /// Panics if `capacity` is 0. Offsets are validated before a window is built.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LagWindow capacity must be greater than 0");
        Self {
            slots: Vec::new(),
            head: 0,
            capacity,
        }
    }

    /// Reserve room for every slot up front.
    ///
    /// Best effort: if the allocator refuses (or the size overflows), the
    /// window keeps growing one slot at a time as it fills.
    pub fn reserve_all(&mut self) {
        let missing = self.capacity - self.slots.len();
        let _ = self.slots.try_reserve_exact(missing);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append during the fill phase.
    pub fn push(&mut self, item: T) {
        debug_assert!(!self.is_full(), "push on a full LagWindow");
        self.slots.push(item);
    }

    /// Replace the oldest element with `item` and return the evicted one.
    ///
    /// # Panics
    /// Panics if the window is not full yet.
    pub fn rotate(&mut self, item: T) -> T {
        assert!(self.is_full(), "rotate on a LagWindow that is still filling");
        let oldest = std::mem::replace(&mut self.slots[self.head], item);
        self.head = (self.head + 1) % self.capacity;
        oldest
    }

    /// Elements from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Drop every buffered element and release the storage.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
        self.head = 0;
    }
}

impl<T: Clone> LagWindow<T> {
    /// Record `current` and return its lag partner: `default_lag` while the
    /// window is filling, the element `capacity` positions back afterwards.
    pub fn advance(&mut self, current: &T, default_lag: &T) -> T {
        if self.is_full() {
            self.rotate(current.clone())
        } else {
            self.push(current.clone());
            default_lag.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_window_is_empty() {
        let window: LagWindow<u8> = LagWindow::new(4);
        assert_eq!(window.capacity(), 4);
        assert_eq!(window.len(), 0);
        assert!(window.is_empty());
        assert!(!window.is_full());
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than 0")]
    fn zero_capacity_panics() {
        let _ = LagWindow::<u8>::new(0);
    }

    #[test]
    fn length_tracks_min_of_seen_and_capacity() {
        let mut window = LagWindow::new(3);
        for (seen, value) in (1..=10).enumerate() {
            window.advance(&value, &0);
            assert_eq!(window.len(), (seen + 1).min(3));
        }
    }

    #[test]
    fn rotation_keeps_oldest_first_order() {
        let mut window = LagWindow::new(3);
        let mut evicted = Vec::new();
        for value in 1..=7 {
            let partner = window.advance(&value, &-1);
            evicted.push(partner);
        }
        assert_eq!(evicted, vec![-1, -1, -1, 1, 2, 3, 4]);
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![5, 6, 7]);
    }

    #[test]
    fn capacity_one_swaps_every_step() {
        let mut window = LagWindow::new(1);
        assert_eq!(window.advance(&"a", &"-"), "-");
        assert_eq!(window.advance(&"b", &"-"), "a");
        assert_eq!(window.advance(&"c", &"-"), "b");
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn reserve_all_does_not_change_length() {
        let mut window: LagWindow<u64> = LagWindow::new(16);
        window.reserve_all();
        assert!(window.is_empty());
        window.push(1);
        window.reserve_all();
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn reserve_all_survives_oversized_capacity() {
        let mut window: LagWindow<u64> = LagWindow::new(usize::MAX);
        window.reserve_all();
        assert!(window.is_empty());
        assert_eq!(window.advance(&7, &0), 0);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn clear_releases_elements() {
        use std::rc::Rc;

        let item = Rc::new(5);
        let mut window = LagWindow::new(3);
        for _ in 0..4 {
            window.advance(&item, &item);
        }
        assert_eq!(Rc::strong_count(&item), 4);
        window.clear();
        assert_eq!(Rc::strong_count(&item), 1);
    }

    #[test]
    fn clear_resets_rotation() {
        let mut window = LagWindow::new(2);
        for value in 0..5 {
            window.advance(&value, &0);
        }
        window.clear();
        assert!(window.is_empty());
        window.push(10);
        window.push(11);
        assert_eq!(window.rotate(12), 10);
    }
}
