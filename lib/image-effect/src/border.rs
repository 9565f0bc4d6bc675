//! Border extension used by the convolution filters.
//!
//! Out-of-range sample positions are mapped back into `0..len`:
//!
//! - `Reflect101`: `gfedcb|abcdefgh|gfedcba`
//! - `Replicate`:  `aaaaaa|abcdefgh|hhhhhhh`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderMode {
    #[default]
    Reflect101,
    Replicate,
}

impl BorderMode {
    /// Maps `index` into `0..len`. `len` must be non-zero.
    pub fn resolve(&self, index: isize, len: usize) -> usize {
        debug_assert!(len > 0);

        let last = len as isize - 1;
        if (0..=last).contains(&index) {
            return index as usize;
        }

        match self {
            BorderMode::Replicate => index.clamp(0, last) as usize,
            BorderMode::Reflect101 => {
                if last == 0 {
                    return 0;
                }

                // Mirror repeatedly so kernels wider than the image stay in range.
                let mut index = index;
                while index < 0 || index > last {
                    index = if index < 0 { -index } else { 2 * last - index };
                }
                index as usize
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_range_is_identity() {
        for mode in [BorderMode::Reflect101, BorderMode::Replicate] {
            for i in 0..5 {
                assert_eq!(mode.resolve(i, 5), i as usize);
            }
        }
    }

    #[test]
    fn test_reflect101() {
        let mode = BorderMode::Reflect101;
        // a b c d e -> index -1 is b, -2 is c, 5 is d, 6 is c
        assert_eq!(mode.resolve(-1, 5), 1);
        assert_eq!(mode.resolve(-2, 5), 2);
        assert_eq!(mode.resolve(5, 5), 3);
        assert_eq!(mode.resolve(6, 5), 2);
    }

    #[test]
    fn test_reflect101_kernel_wider_than_image() {
        let mode = BorderMode::Reflect101;
        assert_eq!(mode.resolve(-3, 2), 1);
        assert_eq!(mode.resolve(3, 2), 1);
        assert_eq!(mode.resolve(4, 2), 0);
    }

    #[test]
    fn test_replicate() {
        let mode = BorderMode::Replicate;
        assert_eq!(mode.resolve(-1, 5), 0);
        assert_eq!(mode.resolve(-7, 5), 0);
        assert_eq!(mode.resolve(5, 5), 4);
        assert_eq!(mode.resolve(100, 5), 4);
    }

    #[test]
    fn test_single_pixel_dimension() {
        for mode in [BorderMode::Reflect101, BorderMode::Replicate] {
            assert_eq!(mode.resolve(-2, 1), 0);
            assert_eq!(mode.resolve(3, 1), 0);
        }
    }
}
