use std::sync::Arc;

use crate::fmt::Fmt;

/// Texture creation parameters, as visible to the shader builder.
///
/// A zero extent means the axis is absent: a 2D texture has `d == 0`, a 1D
/// texture additionally has `h == 0`.
#[derive(Debug, Clone)]
pub struct TexParams {
    pub w: u32,
    pub h: u32,
    pub d: u32,
    pub format: Arc<Fmt>,
    pub sampleable: bool,
    pub renderable: bool,
    pub storable: bool,
}

impl TexParams {
    /// Number of dimensions (1..=3) implied by the non-zero extents.
    pub fn dimension(&self) -> u32 {
        if self.d > 0 {
            3
        } else if self.h > 0 {
            2
        } else {
            1
        }
    }
}

/// Backend texture handle.
///
/// Opaque to the builder beyond its parameters. The backend implementation
/// owns the GPU resource; handle identity is compared via `Arc::ptr_eq`.
pub trait Tex {
    fn params(&self) -> &TexParams;
}

/// Buffer creation parameters, as visible to the shader builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufParams {
    pub size: usize,
    pub uniform: bool,
    pub storable: bool,
}

/// Backend buffer handle. See [`Tex`] for the ownership contract.
pub trait Buf {
    fn params(&self) -> &BufParams;
}
