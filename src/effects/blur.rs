use crate::foundation::error::{PostcraftError, PostcraftResult};

/// Quantized (Q16) symmetric gaussian kernel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianKernel {
    weights: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel for a canvas-style shadow blur: `sigma = blur / 2`, support `ceil(3 * sigma)`.
    ///
    /// Returns `None` when `blur` is zero (no blurring).
    pub fn for_shadow(blur: f32) -> PostcraftResult<Option<Self>> {
        if !blur.is_finite() || blur < 0.0 {
            return Err(PostcraftError::validation("shadow blur must be >= 0"));
        }
        if blur == 0.0 {
            return Ok(None);
        }
        let sigma = blur / 2.0;
        let radius = (3.0 * sigma).ceil() as u32;
        Self::new(radius, sigma).map(Some)
    }

    /// Kernel with `2 * radius + 1` taps whose weights sum to exactly `1 << 16`.
    pub fn new(radius: u32, sigma: f32) -> PostcraftResult<Self> {
        if radius == 0 {
            return Ok(Self {
                weights: vec![1 << 16],
            });
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(PostcraftError::validation("blur sigma must be > 0"));
        }

        let r = radius as i32;
        let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
        let raw: Vec<f64> = (-r..=r)
            .map(|i| {
                let x = f64::from(i);
                (-x * x / denom).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();

        let mut weights: Vec<u32> = raw
            .iter()
            .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
            .collect();
        let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + 65536 - total).clamp(0, 65536) as u32;

        Ok(Self { weights })
    }

    /// Half-width of the kernel in pixels.
    pub fn radius(&self) -> u32 {
        (self.weights.len() / 2) as u32
    }

    /// Q16 weights, centre tap in the middle.
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }
}

/// Gaussian-blur a premultiplied RGBA8 buffer in place.
///
/// Pixels outside the buffer count as transparent, so coverage near the edges
/// fades out rather than smearing. Only the bounding box of non-transparent
/// pixels (grown by the kernel radius) is touched.
pub fn blur_premul_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    kernel: &GaussianKernel,
) -> PostcraftResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PostcraftError::validation("blur buffer size overflow"))?;
    if buf.len() != expected {
        return Err(PostcraftError::validation(
            "blur expects a buffer of width*height*4 bytes",
        ));
    }
    if kernel.radius() == 0 {
        return Ok(());
    }
    let Some(bounds) = alpha_bounds(buf, width, height) else {
        return Ok(());
    };
    let region = bounds.grow(kernel.radius(), width, height);

    let mut tmp = vec![0u8; expected];
    horizontal_pass(buf, &mut tmp, width, region, kernel.weights());
    vertical_pass(&tmp, buf, width, region, kernel.weights());
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Region {
    fn grow(self, by: u32, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.saturating_sub(by),
            y0: self.y0.saturating_sub(by),
            x1: (self.x1 + by).min(width),
            y1: (self.y1 + by).min(height),
        }
    }
}

fn alpha_bounds(buf: &[u8], width: u32, height: u32) -> Option<Region> {
    let mut r: Option<Region> = None;
    for y in 0..height {
        for x in 0..width {
            let a = buf[((y * width + x) as usize) * 4 + 3];
            if a == 0 {
                continue;
            }
            let b = r.get_or_insert(Region {
                x0: x,
                y0: y,
                x1: x + 1,
                y1: y + 1,
            });
            b.x0 = b.x0.min(x);
            b.y0 = b.y0.min(y);
            b.x1 = b.x1.max(x + 1);
            b.y1 = b.y1.max(y + 1);
        }
    }
    r
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, r: Region, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    for y in r.y0..r.y1 {
        for x in r.x0..r.x1 {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = i64::from(x) + ki as i64 - radius;
                if sx < 0 || sx >= i64::from(width) {
                    continue;
                }
                let idx = ((u64::from(y) * u64::from(width)) as usize + sx as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * width + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, r: Region, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let y_end = i64::from(r.y1);
    for y in r.y0..r.y1 {
        for x in r.x0..r.x1 {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = i64::from(y) + ki as i64 - radius;
                // Rows outside the grown region are transparent in `src`.
                if sy < i64::from(r.y0) || sy >= y_end {
                    continue;
                }
                let idx = (sy as usize * width as usize + x as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * width + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
