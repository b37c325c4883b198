use thiserror::Error;

/// One splat record, as stored column-wise in a [`SplatSet`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splat {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    /// Quaternion, scalar first (w, x, y, z).
    pub rotation: [f32; 4],
    pub color: [f32; 3],
    pub opacity: f32,
}

/// A set of splats stored as five parallel arrays.
///
/// All arrays always have the same length; the only way to grow a set is
/// [`SplatSet::push`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplatSet {
    positions: Vec<[f32; 3]>,
    scales: Vec<[f32; 3]>,
    rotations: Vec<[f32; 4]>,
    colors: Vec<[f32; 3]>,
    opacities: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("field '{field}' has {found} entries, expected {expected}")]
pub struct LengthMismatch {
    pub expected: usize,
    pub field: &'static str,
    pub found: usize,
}

impl SplatSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            scales: Vec::with_capacity(capacity),
            rotations: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            opacities: Vec::with_capacity(capacity),
        }
    }

    /// Assemble a set from raw columns, checking that they line up.
    pub fn from_columns(
        positions: Vec<[f32; 3]>,
        scales: Vec<[f32; 3]>,
        rotations: Vec<[f32; 4]>,
        colors: Vec<[f32; 3]>,
        opacities: Vec<f32>,
    ) -> Result<Self, LengthMismatch> {
        let expected = positions.len();
        for (field, found) in [
            ("scales", scales.len()),
            ("rotations", rotations.len()),
            ("colors", colors.len()),
            ("opacities", opacities.len()),
        ] {
            if found != expected {
                return Err(LengthMismatch {
                    expected,
                    field,
                    found,
                });
            }
        }
        Ok(Self {
            positions,
            scales,
            rotations,
            colors,
            opacities,
        })
    }

    pub fn push(&mut self, splat: Splat) {
        self.positions.push(splat.position);
        self.scales.push(splat.scale);
        self.rotations.push(splat.rotation);
        self.colors.push(splat.color);
        self.opacities.push(splat.opacity);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn at(&self, index: usize) -> Splat {
        Splat {
            position: self.positions[index],
            scale: self.scales[index],
            rotation: self.rotations[index],
            color: self.colors[index],
            opacity: self.opacities[index],
        }
    }

    pub fn get(&self, index: usize) -> Option<Splat> {
        (index < self.len()).then(|| self.at(index))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Splat> + '_ {
        (0..self.len()).map(|i| self.at(i))
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn scales(&self) -> &[[f32; 3]] {
        &self.scales
    }

    pub fn rotations(&self) -> &[[f32; 4]] {
        &self.rotations
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// Keep every `stride`th splat, starting at index 0.
    pub fn decimated(&self, stride: usize) -> Self {
        assert!(stride > 0, "decimation stride must be positive");

        let mut out = Self::with_capacity(self.len().div_ceil(stride));
        for i in (0..self.len()).step_by(stride) {
            out.push(self.at(i));
        }
        out
    }
}

impl FromIterator<Splat> for SplatSet {
    fn from_iter<T: IntoIterator<Item = Splat>>(iter: T) -> Self {
        let mut set = Self::default();
        for splat in iter {
            set.push(splat);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> SplatSet {
        (0..n)
            .map(|i| Splat {
                position: [i as f32, 0.0, 0.0],
                scale: [0.1; 3],
                rotation: [1.0, 0.0, 0.0, 0.0],
                color: [0.5; 3],
                opacity: 0.8,
            })
            .collect()
    }

    #[test]
    fn decimation_keeps_every_fourth() {
        for n in [0, 1, 2, 4, 5, 9, 17] {
            let full = numbered(n);
            let mobile = full.decimated(4);
            assert_eq!(mobile.len(), n.div_ceil(4), "wrong length for n={n}");
            for (i, splat) in mobile.iter().enumerate() {
                assert_eq!(Some(splat), full.get(4 * i), "mismatch at {i} for n={n}");
            }
        }
    }

    #[test]
    fn from_columns_rejects_ragged_input() {
        let err = SplatSet::from_columns(
            vec![[0.0; 3]; 2],
            vec![[0.0; 3]; 2],
            vec![[0.0; 4]; 2],
            vec![[0.0; 3]; 1],
            vec![0.0; 2],
        )
        .unwrap_err();
        assert_eq!(err.field, "colors");
        assert_eq!(err.found, 1);
    }

    #[test]
    fn get_out_of_range_is_none() {
        assert!(numbered(3).get(3).is_none(), "index 3 is past the end");
    }
}
