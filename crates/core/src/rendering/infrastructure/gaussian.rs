//! Separable Gaussian blur over packed 8-bit pixel buffers.

/// Normalised 1D Gaussian kernel. `size` must be odd; sigma is `size / 6`.
pub fn kernel_1d(size: usize) -> Vec<f32> {
    debug_assert!(size % 2 == 1);
    let sigma = size as f64 / 6.0;
    let half = (size / 2) as f64;
    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - half;
            (-d * d / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    weights.iter().map(|w| (w / total) as f32).collect()
}

/// Blurs `data` (`width` x `height`, `channels` interleaved) in place.
/// Samples past the buffer edge repeat the edge pixel.
pub fn blur(data: &mut [u8], width: usize, height: usize, channels: usize, kernel: &[f32]) {
    if kernel.len() <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = (kernel.len() / 2) as isize;
    let clamp = |v: isize, len: usize| v.clamp(0, len as isize - 1) as usize;
    let mut horizontal = vec![0.0f32; width * height * channels];

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, w) in kernel.iter().enumerate() {
                    let sx = clamp(x as isize + k as isize - half, width);
                    acc += data[(y * width + sx) * channels + c] as f32 * w;
                }
                horizontal[(y * width + x) * channels + c] = acc;
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, w) in kernel.iter().enumerate() {
                    let sy = clamp(y as isize + k as isize - half, height);
                    acc += horizontal[(sy * width + x) * channels + c] * w;
                }
                data[(y * width + x) * channels + c] = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kernel_is_normalised_and_symmetric() {
        let k = kernel_1d(9);
        assert_abs_diff_eq!(k.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        for i in 0..k.len() / 2 {
            assert_abs_diff_eq!(k[i], k[k.len() - 1 - i], epsilon = 1e-7);
        }
        assert!(k.iter().all(|&w| w <= k[4]));
    }

    #[test]
    fn test_uniform_buffer_is_unchanged() {
        let mut data = vec![128u8; 12 * 8 * 3];
        blur(&mut data, 12, 8, 3, &kernel_1d(5));
        assert!(data.iter().all(|&v| (v as i32 - 128).abs() <= 1));
    }

    #[test]
    fn test_spreads_a_bright_pixel() {
        let mut data = vec![0u8; 9 * 9 * 3];
        let centre = (4 * 9 + 4) * 3;
        data[centre..centre + 3].copy_from_slice(&[255, 255, 255]);

        blur(&mut data, 9, 9, 3, &kernel_1d(5));

        assert!(data[centre] < 255);
        assert!(data[(4 * 9 + 5) * 3] > 0);
        assert_eq!(data[0], 0);
    }

    #[test]
    fn test_kernel_of_one_is_identity() {
        let mut data: Vec<u8> = (0..5 * 5 * 3).map(|v| v as u8).collect();
        let original = data.clone();
        blur(&mut data, 5, 5, 3, &kernel_1d(1));
        assert_eq!(data, original);
    }
}
