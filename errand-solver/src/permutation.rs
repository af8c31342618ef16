//! Lazy generation of every ordering of a small sequence.
//!
//! Orderings are produced in lexicographic order of the original positions:
//! the element at position 0 leads first, followed by every ordering of the
//! remaining elements, then the element at position 1, and so on. This is the
//! order a recursive "remove one, permute the rest, prepend" generator yields,
//! so the first ordering reaching a minimum is stable across implementations.
//!
//! Only one ordering is held in memory at a time.

/// Iterator over all `n!` orderings of a sequence.
///
/// An empty or single-element input yields exactly one ordering.
///
/// # Examples
/// ```
/// use errand_solver::Permutations;
///
/// let orders: Vec<Vec<char>> = Permutations::new(vec!['a', 'b', 'c']).collect();
/// assert_eq!(
///     orders,
///     vec![
///         vec!['a', 'b', 'c'],
///         vec!['a', 'c', 'b'],
///         vec!['b', 'a', 'c'],
///         vec!['b', 'c', 'a'],
///         vec!['c', 'a', 'b'],
///         vec!['c', 'b', 'a'],
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    items: Vec<T>,
    indices: Vec<usize>,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Exhausted,
}

impl<T: Clone> Permutations<T> {
    /// Prepare to enumerate the orderings of `items`.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        let indices = (0..items.len()).collect();
        Self {
            items,
            indices,
            state: State::Fresh,
        }
    }

    /// Rewind to the first ordering.
    pub fn restart(&mut self) {
        self.indices = (0..self.items.len()).collect();
        self.state = State::Fresh;
    }

    /// Total number of orderings, or `None` when `n!` overflows `usize`.
    #[must_use]
    pub fn total(&self) -> Option<usize> {
        (1..=self.items.len()).try_fold(1_usize, usize::checked_mul)
    }

    fn current(&self) -> Vec<T> {
        self.indices
            .iter()
            .filter_map(|&index| self.items.get(index).cloned())
            .collect()
    }

    /// Step `indices` to the next lexicographic ordering.
    ///
    /// Returns `false` once the last ordering has been produced.
    fn advance(&mut self) -> bool {
        let len = self.indices.len();
        let pivot = (0..len.saturating_sub(1))
            .rev()
            .find(|&i| self.indices.get(i) < self.indices.get(i + 1));
        let Some(pivot) = pivot else {
            return false;
        };
        let pivot_value = self.indices.get(pivot).copied();
        let Some(successor) = ((pivot + 1)..len)
            .rev()
            .find(|&j| self.indices.get(j).copied() > pivot_value)
        else {
            return false;
        };
        self.indices.swap(pivot, successor);
        if let Some(tail) = self.indices.get_mut((pivot + 1)..) {
            tail.reverse();
        }
        true
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Exhausted => None,
            State::Fresh => {
                self.state = State::Running;
                Some(self.current())
            }
            State::Running => {
                if self.advance() {
                    Some(self.current())
                } else {
                    self.state = State::Exhausted;
                    None
                }
            }
        }
    }
}
