use std::cmp::PartialOrd;
use std::ops::Deref;

/// A pair of elements sorted in increasing order.
///
/// Used as the key of undirected mesh edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }
}

impl<T: PartialOrd + Copy> SortedPair<T> {
    /// The smallest element of this pair.
    pub fn first(&self) -> T {
        self.0[0]
    }

    /// The largest element of this pair.
    pub fn second(&self) -> T {
        self.0[1]
    }

    /// Given one element of this pair, returns the other one.
    pub fn other(&self, element: T) -> T {
        if self.0[0] == element {
            self.0[1]
        } else {
            self.0[0]
        }
    }
}

impl<T: PartialOrd> Deref for SortedPair<T> {
    type Target = [T; 2];

    fn deref(&self) -> &[T; 2] {
        &self.0
    }
}
