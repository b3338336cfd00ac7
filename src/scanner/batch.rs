/// Contiguous slice of the identifier range, lower inclusive, upper
/// exclusive, at most one batch size long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    pub start: u32,
    pub end: u32,
}

impl Batch {
    pub fn ids(&self) -> impl Iterator<Item = u32> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Splits `[lower, upper)` into consecutive batches of `batch_size`, the
/// last possibly shorter.
pub fn partition(lower: u32, upper: u32, batch_size: usize) -> Vec<Batch> {
    assert!(batch_size >= 1, "batch size must be at least 1");

    let mut batches = Vec::new();
    let mut start = lower;

    while start < upper {
        let end = start.saturating_add(batch_size as u32).min(upper);
        batches.push(Batch { start, end });
        start = end;
    }

    batches
}
