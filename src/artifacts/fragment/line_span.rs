use derive_new::new;

/// Half-open range of whole lines `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Overlapping or sharing a boundary
    pub fn touches(&self, other: &LineSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
