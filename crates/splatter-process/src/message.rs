/// Progress of a single conversion, in the order the stages are entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvertStage {
    /// Validating the mesh and computing per-face geometry.
    Analyzing { faces: usize },
    /// Building the full resolution splat set.
    Synthesizing { usable_faces: usize },
    /// Encoding the web, desktop and mobile payloads.
    Encoding { splats: usize },
    /// Moving the encoded payloads into the output directory.
    Writing,
    Succeeded { splat_count: usize },
    Failed,
}

impl ConvertStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed)
    }
}
