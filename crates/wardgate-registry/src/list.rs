//! Insertion-ordered list shared by the client registry and the allow lists.
//!
//! Elements are appended at the tail and keep their relative order across
//! removals. The list exclusively owns its elements: every removal hands
//! the element back to the caller, so it is dropped exactly once.

/// An append-only-at-tail sequence with predicate-based lookup and removal.
///
/// All lookups are linear scans from the head; the first match in
/// insertion order wins.
#[derive(Debug)]
pub(crate) struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> OrderedList<T> {
    pub(crate) const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends `item` at the tail and returns a reference to it.
    pub(crate) fn push_back(&mut self, item: T) -> &mut T {
        self.items.push(item);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub(crate) fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| pred(*item))
    }

    pub(crate) fn find_mut(
        &mut self,
        mut pred: impl FnMut(&T) -> bool,
    ) -> Option<&mut T> {
        self.items.iter_mut().find(|item| pred(&**item))
    }

    /// Unlinks the first element matching `pred` and returns it.
    pub(crate) fn remove_first(
        &mut self,
        pred: impl FnMut(&T) -> bool,
    ) -> Option<T> {
        let index = self.items.iter().position(pred)?;
        // `remove` (not `swap_remove`): the survivors must stay in order.
        Some(self.items.remove(index))
    }

    /// Unlinks every element matching `pred` in a single pass.
    ///
    /// Returns the removed elements in their original order. The head and
    /// the tail are treated like any other position.
    pub(crate) fn drain_where(
        &mut self,
        mut pred: impl FnMut(&T) -> bool,
    ) -> Vec<T> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if pred(&item) {
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        removed
    }

    /// Drops every element, returning how many there were.
    pub(crate) fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
