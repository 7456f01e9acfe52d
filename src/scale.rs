use serde::Serialize;

// ---------------------------------------------------------------------------
// Linear scale: continuous domain → pixel range
// ---------------------------------------------------------------------------

/// Maps a numeric domain onto a pixel range.
///
/// Vertical axes pass `[height, 0.0]` as the range so larger values land
/// nearer the top. Values outside the domain are extrapolated, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        LinearScale { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Pixel → domain value. A collapsed range maps to the domain midpoint.
    pub fn invert(&self, pixel: f64) -> f64 {
        LinearScale::new(self.range, self.domain).map(pixel)
    }
}

// ---------------------------------------------------------------------------
// Band scale: categories → equal-width slots
// ---------------------------------------------------------------------------

/// Splits a pixel range into one equal-width band per category.
///
/// `padding_inner` is the fraction of each step left empty between bands,
/// `padding_outer` the number of steps left before the first and after the
/// last band, and `align` how that outer space is shared (0.5 centres).
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: [f64; 2],
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: [f64; 2]) -> Self {
        BandScale {
            domain,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Set inner and outer padding together.
    pub fn padding(self, padding: f64) -> Self {
        self.padding_inner(padding).padding_outer(padding)
    }

    pub fn padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    pub fn padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    pub fn align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let span = (self.range[1] - self.range[0]).abs();
        span / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Width of each band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band for `category`, or `None` if it is not in the domain.
    pub fn map(&self, category: &str) -> Option<f64> {
        let idx = self.domain.iter().position(|c| c == category)?;
        let n = self.domain.len();
        let [r0, r1] = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };

        let step = self.step();
        let first = start + (stop - start - step * (n as f64 - self.padding_inner)) * self.align;
        // Reversed ranges run the bands right to left.
        let slot = if r1 < r0 { n - 1 - idx } else { idx };
        Some(first + step * slot as f64)
    }
}
