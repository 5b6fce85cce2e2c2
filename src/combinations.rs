//! Enumeration of every assignment to `n` variables.

/// Iterator over all `2^width` boolean vectors of length `width`.
///
/// Vector `i` is the binary expansion of `i`, most significant bit first, so the
/// first vector is all `false` and the last is all `true`.
#[derive(Debug, Clone)]
pub struct Combinations {
    width: usize,
    next: u64,
    total: u64,
}

impl Combinations {
    /// # Panics
    ///
    /// Panics if `width` is 64 or more, as the number of combinations would not
    /// fit in a `u64`.
    pub fn new(width: usize) -> Self {
        let Some(total) = u32::try_from(width)
            .ok()
            .and_then(|w| 1u64.checked_shl(w))
        else {
            panic!("cannot enumerate 2^{width} combinations");
        };

        Self {
            width,
            next: 0,
            total,
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// The vector at position `index` of the canonical order.
    pub fn nth_combination(width: usize, index: u64) -> Vec<bool> {
        (0..width)
            .rev()
            .map(|bit| bit < 64 && (index >> bit) & 1 == 1)
            .collect()
    }
}

impl Iterator for Combinations {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }

        let combination = Self::nth_combination(self.width, self.next);
        self.next += 1;
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total - self.next).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

impl ExactSizeIterator for Combinations {}
