//! Cycle position over the discovered sample files.

/// Index of the next sample file to send.
///
/// Always in `0..len`, and `len` is never zero. After `k` calls to
/// [`CyclePosition::advance`] the index equals `k % len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePosition {
    index: usize,
    len: usize,
}

impl CyclePosition {
    /// Start at the first file. Returns `None` when there are no files.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    /// Current zero-based index
    pub fn current(&self) -> usize {
        self.index
    }

    /// Number of files being cycled
    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true: a cycle has at least one file
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Move to the next file, wrapping to zero after the last one
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.len;
    }
}

impl std::fmt::Display for CyclePosition {
    /// One-based, as shown in the progress line: `2/5`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.index + 1, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_has_no_position() {
        assert!(CyclePosition::new(0).is_none());
    }

    #[test]
    fn test_wraps_after_last() {
        let mut pos = CyclePosition::new(3).unwrap();
        let visited: Vec<usize> = (0..7)
            .map(|_| {
                let i = pos.current();
                pos.advance();
                i
            })
            .collect();
        assert_eq!(visited, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_single_file_stays_at_zero() {
        let mut pos = CyclePosition::new(1).unwrap();
        pos.advance();
        pos.advance();
        assert_eq!(pos.current(), 0);
    }

    #[test]
    fn test_display_is_one_based() {
        let mut pos = CyclePosition::new(5).unwrap();
        assert_eq!(pos.to_string(), "1/5");
        pos.advance();
        assert_eq!(pos.to_string(), "2/5");
    }

    proptest! {
        #[test]
        fn prop_position_is_k_mod_n(len in 1usize..64, k in 0usize..1000) {
            let mut pos = CyclePosition::new(len).unwrap();
            for _ in 0..k {
                pos.advance();
            }
            prop_assert_eq!(pos.current(), k % len);
            prop_assert!(pos.current() < pos.len());
        }
    }
}
