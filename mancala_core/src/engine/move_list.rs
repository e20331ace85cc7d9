/// Fixed-capacity list of pit indices. A row never offers more than `N`
/// moves, so enumeration never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitList<const N: usize> {
    pub pits: [usize; N],
    pub count: usize,
}

impl<const N: usize> Default for PitList<N> {
    fn default() -> Self {
        Self {
            pits: [0; N],
            count: 0,
        }
    }
}

impl<const N: usize> PitList<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pit: usize) {
        if let Some(slot) = self.pits.get_mut(self.count) {
            *slot = pit;
            self.count += 1;
        } else {
            debug_assert!(false, "PitList overflow! Capacity: {N}");
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        self.pits.get(0..self.count).unwrap_or(&[])
    }
}

impl<const N: usize> IntoIterator for PitList<N> {
    type Item = usize;
    type IntoIter = std::iter::Take<std::array::IntoIter<usize, N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pits.into_iter().take(self.count)
    }
}
