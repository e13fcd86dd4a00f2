//! Streaming Durstenfeld shuffle.
//!
//! Step `i` picks `j = i + below(len - i)`, yields whatever currently sits in
//! slot `j`, and moves slot `i` into slot `j`. Only as much of the source is
//! realized as has been reached, and the source itself is never modified.
//! Every variant consumes one draw per yielded element.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::engine::Engine;

/// Lazy shuffle over a borrowed slice, yielding references into it.
///
/// Slots that have been displaced are tracked in a sparse map from slot to
/// source index; untouched slots map to themselves.
pub struct LazyShuffle<'r, 's, T> {
    engine: &'r mut Engine,
    items: &'s [T],
    moved: FxHashMap<usize, usize>,
    next: usize,
}

impl<'r, 's, T> LazyShuffle<'r, 's, T> {
    fn new(engine: &'r mut Engine, items: &'s [T]) -> Self {
        Self {
            engine,
            items,
            moved: FxHashMap::default(),
            next: 0,
        }
    }

    fn slot(&self, k: usize) -> usize {
        self.moved.get(&k).copied().unwrap_or(k)
    }
}

impl<'s, T> Iterator for LazyShuffle<'_, 's, T> {
    type Item = &'s T;

    fn next(&mut self) -> Option<&'s T> {
        let len = self.items.len();
        if self.next >= len {
            return None;
        }

        let i = self.next;
        let j = i + self.engine.below(len - i);
        let picked = self.slot(j);
        let displaced = self.slot(i);
        self.moved.insert(j, displaced);
        // Slot i is behind the cursor now and is never read again.
        self.moved.remove(&i);
        self.next += 1;

        Some(&self.items[picked])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.items.len() - self.next;
        (left, Some(left))
    }
}

impl<T> ExactSizeIterator for LazyShuffle<'_, '_, T> {}
impl<T> FusedIterator for LazyShuffle<'_, '_, T> {}

/// Lazy shuffle over an owned source of known length, pulling items on demand.
///
/// The backing window starts at the cursor and extends to the highest slot
/// touched so far. If the source ends before its announced length the
/// shuffle ends there too.
pub struct StreamShuffle<'r, I: Iterator> {
    engine: &'r mut Engine,
    source: I,
    window: VecDeque<I::Item>,
    len: usize,
    next: usize,
}

impl<'r, I: Iterator> StreamShuffle<'r, I> {
    fn new(engine: &'r mut Engine, source: I, len: usize) -> Self {
        Self {
            engine,
            source,
            window: VecDeque::new(),
            len,
            next: 0,
        }
    }

    /// Number of source items pulled but not yet yielded.
    pub fn buffered(&self) -> usize {
        self.window.len()
    }
}

impl<I: Iterator> Iterator for StreamShuffle<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.next >= self.len {
            return None;
        }

        let offset = self.engine.below(self.len - self.next);
        while self.window.len() <= offset {
            match self.source.next() {
                Some(item) => self.window.push_back(item),
                None => {
                    debug!(
                        announced = self.len,
                        available = self.next + self.window.len(),
                        "source ended early, stopping shuffle"
                    );
                    self.len = self.next;
                    self.window.clear();
                    return None;
                }
            }
        }

        self.window.swap(0, offset);
        self.next += 1;
        self.window.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.len - self.next))
    }
}

impl<I: Iterator> FusedIterator for StreamShuffle<'_, I> {}

impl Engine {
    /// Lazily shuffle a slice without copying or mutating it.
    pub fn lazy_shuffle<'r, 's, T>(&'r mut self, items: &'s [T]) -> LazyShuffle<'r, 's, T> {
        LazyShuffle::new(self, items)
    }

    /// Lazily shuffle a source whose length is known up front, pulling each
    /// item only when the shuffle reaches it.
    pub fn lazy_shuffle_sized<I>(&mut self, source: I) -> StreamShuffle<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
    {
        let source = source.into_iter();
        let len = source.len();
        StreamShuffle::new(self, source, len)
    }

    /// Shuffle a source of unknown length by collecting it first, then
    /// running the same streaming algorithm over the collected items.
    pub fn lazy_shuffle_unsized<I>(&mut self, source: I) -> StreamShuffle<'_, std::vec::IntoIter<I::Item>>
    where
        I: IntoIterator,
    {
        let items: Vec<I::Item> = source.into_iter().collect();
        debug!(len = items.len(), "materialized unsized source for shuffle");
        let len = items.len();
        StreamShuffle::new(self, items.into_iter(), len)
    }
}
