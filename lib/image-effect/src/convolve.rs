//! Per-channel convolutions over a [`Raster`].
//!
//! Kernels are centred on the output pixel. Samples outside the image are
//! fetched through the given [`BorderMode`]. Outputs always have the same
//! width, height and channel count as the input.

use crate::{BorderMode, raster::Raster};

/// Applies `row_kernel` along x then `col_kernel` along y.
///
/// Both passes accumulate in `f32`; the result is rounded and clamped once.
pub fn separable(
    src: &Raster,
    row_kernel: &[f32],
    col_kernel: &[f32],
    border: BorderMode,
) -> Raster {
    let (width, height, channels) = (src.width as usize, src.height as usize, src.channels);
    let mut dst = Raster::new(src.width, src.height, channels);

    if width == 0 || height == 0 {
        return dst;
    }

    let row_radius = (row_kernel.len() / 2) as isize;
    let col_radius = (col_kernel.len() / 2) as isize;
    let mut horizontal = vec![0f32; src.data.len()];

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0f32;
                for (k, weight) in row_kernel.iter().enumerate() {
                    let sx = border.resolve(x as isize + k as isize - row_radius, width);
                    sum += src.data[src.index(sx, y, c)] as f32 * weight;
                }
                horizontal[src.index(x, y, c)] = sum;
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0f32;
                for (k, weight) in col_kernel.iter().enumerate() {
                    let sy = border.resolve(y as isize + k as isize - col_radius, height);
                    sum += horizontal[src.index(x, sy, c)] * weight;
                }
                let i = dst.index(x, y, c);
                dst.data[i] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    dst
}

/// Applies an integer 3x3 kernel, saturating each result to `0..=255`.
pub fn kernel_3x3(src: &Raster, kernel: &[[i32; 3]; 3], border: BorderMode) -> Raster {
    let (width, height, channels) = (src.width as usize, src.height as usize, src.channels);
    let mut dst = Raster::new(src.width, src.height, channels);

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0i32;
                for (ky, row) in kernel.iter().enumerate() {
                    let sy = border.resolve(y as isize + ky as isize - 1, height);
                    for (kx, weight) in row.iter().enumerate() {
                        if *weight == 0 {
                            continue;
                        }
                        let sx = border.resolve(x as isize + kx as isize - 1, width);
                        sum += src.data[src.index(sx, sy, c)] as i32 * weight;
                    }
                }
                let i = dst.index(x, y, c);
                dst.data[i] = sum.clamp(0, 255) as u8;
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, data: Vec<u8>) -> Raster {
        Raster {
            width,
            height,
            channels: 1,
            data,
        }
    }

    #[test]
    fn test_identity_kernels() {
        let src = gray(3, 2, vec![1, 2, 3, 4, 5, 6]);

        let out = separable(&src, &[1.0], &[1.0], BorderMode::Reflect101);
        assert_eq!(out, src);

        let identity = [[0, 0, 0], [0, 1, 0], [0, 0, 0]];
        let out = kernel_3x3(&src, &identity, BorderMode::Replicate);
        assert_eq!(out, src);
    }

    #[test]
    fn test_separable_box_with_replicate_border() {
        // Row [0, 90, 0] averaged with replicate border: [30, 30, 30]
        let src = gray(3, 1, vec![0, 90, 0]);
        let third = 1.0 / 3.0;
        let out = separable(&src, &[third; 3], &[1.0], BorderMode::Replicate);
        assert_eq!(out.data, vec![30, 30, 30]);
    }

    #[test]
    fn test_separable_box_with_reflect101_border() {
        // Reflect101 pads [0, 90, 0] as 90|0 90 0|90
        let src = gray(3, 1, vec![0, 90, 0]);
        let third = 1.0 / 3.0;
        let out = separable(&src, &[third; 3], &[1.0], BorderMode::Reflect101);
        assert_eq!(out.data, vec![60, 30, 60]);
    }

    #[test]
    fn test_kernel_3x3_saturates() {
        let src = gray(3, 3, vec![0, 0, 0, 0, 200, 0, 0, 0, 0]);
        let double = [[0, 0, 0], [0, 2, 0], [0, 0, 0]];
        let out = kernel_3x3(&src, &double, BorderMode::Replicate);
        assert_eq!(out.data[4], 255);

        let negate = [[0, 0, 0], [0, -1, 0], [0, 0, 0]];
        let out = kernel_3x3(&src, &negate, BorderMode::Replicate);
        assert!(out.data.iter().all(|v| *v == 0));
    }

    #[test]
    fn test_channels_are_independent() {
        let src = Raster {
            width: 2,
            height: 1,
            channels: 2,
            data: vec![10, 200, 30, 100],
        };
        let out = separable(&src, &[0.5, 0.5, 0.0], &[1.0], BorderMode::Replicate);
        // x=0 pulls from x=-1 (replicated x=0) and x=0
        assert_eq!(out.data, vec![10, 200, 20, 150]);
    }
}
