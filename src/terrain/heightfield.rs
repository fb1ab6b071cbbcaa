//! Square grid of normalized elevations

/// A `resolution × resolution` grid of elevations in [0, 1].
///
/// Stored row-major: row index is the z axis, column index is the x axis.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    resolution: usize,
    data: Vec<f32>,
}

impl HeightField {
    /// Wrap pre-computed heights. Returns `None` if `data` is not square
    /// with side `resolution`.
    pub fn from_vec(resolution: usize, data: Vec<f32>) -> Option<Self> {
        (resolution > 0 && data.len() == resolution * resolution)
            .then_some(Self { resolution, data })
    }

    /// A flat field at a constant height
    pub fn flat(resolution: usize, height: f32) -> Self {
        Self {
            resolution,
            data: vec![height.clamp(0.0, 1.0); resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Height at column `x`, row `z`
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.data[z * self.resolution + x]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Bilinear sample at fractional grid coordinates, clamped to the grid.
    pub fn sample_bilinear(&self, gx: f32, gz: f32) -> f32 {
        let max = (self.resolution - 1) as f32;
        let gx = gx.clamp(0.0, max);
        let gz = gz.clamp(0.0, max);

        let x0 = gx.floor() as usize;
        let z0 = gz.floor() as usize;
        let x1 = (x0 + 1).min(self.resolution - 1);
        let z1 = (z0 + 1).min(self.resolution - 1);
        let tx = gx - x0 as f32;
        let tz = gz - z0 as f32;

        let top = self.get(x0, z0) * (1.0 - tx) + self.get(x1, z0) * tx;
        let bottom = self.get(x0, z1) * (1.0 - tx) + self.get(x1, z1) * tx;
        top * (1.0 - tz) + bottom * tz
    }

    /// (min, max) over all cells
    pub fn bounds(&self) -> (f32, f32) {
        self.data.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
            (lo.min(h), hi.max(h))
        })
    }
}
