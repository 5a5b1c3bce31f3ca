use tiny_skia::Pixmap;

const ONE_Q16: u32 = 1 << 16;

/// Canvas `shadowBlur` is twice the Gaussian standard deviation.
pub(crate) fn sigma_for(blur: f32) -> f32 {
    blur / 2.0
}

/// Pixels a kernel for `sigma` reaches on each side.
pub(crate) fn radius_for(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        0
    } else {
        (sigma * 3.0).ceil() as u32
    }
}

/// Normalized Gaussian weights in 16.16 fixed point; they sum to exactly 1.0.
pub(crate) fn gaussian_kernel(sigma: f32) -> Vec<u32> {
    let radius = radius_for(sigma);
    if radius == 0 {
        return vec![ONE_Q16];
    }
    let r = radius as i32;
    let denom = 2.0 * (sigma as f64) * (sigma as f64);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * ONE_Q16 as f64).round().clamp(0.0, ONE_Q16 as f64) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = i64::from(ONE_Q16) - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, i64::from(ONE_Q16)) as u32;
    }
    weights
}

/// Blur a premultiplied pixmap in place. Samples outside the pixmap are transparent.
pub(crate) fn blur_pixmap(pixmap: &mut Pixmap, blur: f32) {
    let kernel = gaussian_kernel(sigma_for(blur));
    if kernel.len() == 1 {
        return;
    }
    let (w, h) = (pixmap.width() as usize, pixmap.height() as usize);
    let mut tmp = vec![0u8; w * h * 4];
    pass(pixmap.data(), &mut tmp, w, h, &kernel, Axis::Horizontal);
    pass(&tmp, pixmap.data_mut(), w, h, &kernel, Axis::Vertical);
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn pass(src: &[u8], dst: &mut [u8], w: usize, h: usize, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as isize;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as isize - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => (x as isize + d, y as isize),
                    Axis::Vertical => (x as isize, y as isize + d),
                };
                if sx < 0 || sy < 0 || sx >= w as isize || sy >= h as isize {
                    continue;
                }
                let idx = (sy as usize * w + sx as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = (y * w + x) * 4;
            let a = q16_to_u8(acc[3]);
            for c in 0..3 {
                dst[out + c] = q16_to_u8(acc[c]).min(a);
            }
            dst[out + 3] = a;
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{Color, Paint, Rect, Transform};

    #[test]
    fn test_kernel_sums_to_one() {
        for sigma in [0.5, 1.0, 2.0, 3.7, 10.0] {
            let k = gaussian_kernel(sigma);
            assert_eq!(k.iter().sum::<u32>(), ONE_Q16, "sigma {sigma}");
            assert_eq!(k.len() % 2, 1);
        }
    }

    #[test]
    fn test_zero_blur_is_identity_kernel() {
        assert_eq!(gaussian_kernel(0.0), vec![ONE_Q16]);
        assert_eq!(gaussian_kernel(f32::NAN), vec![ONE_Q16]);
    }

    #[test]
    fn test_blur_spreads_and_fades_at_edges() {
        let mut pm = Pixmap::new(30, 30).unwrap();
        let mut paint = Paint::default();
        paint.set_color(Color::BLACK);
        pm.fill_rect(Rect::from_xywh(10.0, 10.0, 10.0, 10.0).unwrap(), &paint, Transform::identity(), None);
        blur_pixmap(&mut pm, 4.0);
        let alpha = |x: u32, y: u32| pm.pixel(x, y).unwrap().alpha();
        assert!(alpha(15, 15) > 200);
        assert!(alpha(9, 15) > 0);
        assert!(alpha(9, 15) < alpha(11, 15));
        assert_eq!(alpha(0, 0), 0);
    }

    #[test]
    fn test_blur_keeps_premultiplied_invariant() {
        let mut pm = Pixmap::new(12, 12).unwrap();
        let mut paint = Paint::default();
        paint.set_color_rgba8(200, 40, 90, 180);
        pm.fill_rect(Rect::from_xywh(3.0, 3.0, 5.0, 4.0).unwrap(), &paint, Transform::identity(), None);
        blur_pixmap(&mut pm, 3.0);
        for p in pm.pixels() {
            assert!(p.red() <= p.alpha() && p.green() <= p.alpha() && p.blue() <= p.alpha());
        }
    }
}
