//! Wrapped index arithmetic for fixed-length rings.

/// Index one step after `current`, wrapping to `0`.
///
/// Returns `None` when `current` is outside `0..len`.
pub fn next_index(len: usize, current: usize) -> Option<usize> {
    (current < len).then(|| (current + 1) % len)
}

/// Index one step before `current`, wrapping to `len - 1`.
pub fn prev_index(len: usize, current: usize) -> Option<usize> {
    (current < len).then(|| if current == 0 { len - 1 } else { current - 1 })
}

#[cfg(test)]
mod tests {
    use super::{next_index, prev_index};
    use proptest::prelude::*;

    #[test]
    fn next_index_wraps() {
        assert_eq!(next_index(3, 1), Some(2));
        assert_eq!(next_index(3, 2), Some(0));
    }

    #[test]
    fn prev_index_wraps() {
        assert_eq!(prev_index(3, 0), Some(2));
        assert_eq!(prev_index(3, 2), Some(1));
    }

    #[test]
    fn out_of_range_is_none() {
        assert_eq!(next_index(3, 3), None);
        assert_eq!(prev_index(0, 0), None);
    }

    #[test]
    fn single_slot_stays_put() {
        assert_eq!(next_index(1, 0), Some(0));
        assert_eq!(prev_index(1, 0), Some(0));
    }

    proptest! {
        #[test]
        fn prop_prev_undoes_next(len in 1_usize..32, start in 0_usize..32) {
            let start = start % len;
            let next = next_index(len, start);
            prop_assert_eq!(next.and_then(|next| prev_index(len, next)), Some(start));
        }

        #[test]
        fn prop_repeated_next_wraps(len in 1_usize..32, start in 0_usize..32, steps in 0_usize..200) {
            let start = start % len;
            let mut current = start;
            for _ in 0..steps {
                current = next_index(len, current).unwrap_or(current);
            }
            prop_assert_eq!(current, (start + steps) % len);
        }
    }
}
