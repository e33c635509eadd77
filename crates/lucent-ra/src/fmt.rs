use bitflags::bitflags;

/// Base representation of a format's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FmtType {
    Float,
    Unorm,
    Snorm,
    Uint,
    Sint,
}

bitflags! {
    /// What a format can be used for on a given backend.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FmtCaps: u32 {
        /// Usable as a sampled texture format.
        const SAMPLEABLE = 1 << 0;
        /// Usable as a storage image format.
        const STORABLE = 1 << 1;
        /// Usable as a render target format.
        const RENDERABLE = 1 << 2;
        /// Usable as a vertex attribute format.
        const VERTEX = 1 << 3;
        /// Supports linear filtering when sampled.
        const LINEAR = 1 << 4;
    }
}

/// Description of a texel or vertex data format.
///
/// Formats are backend-owned static data; they are shared by `Arc` and
/// never constructed by the shader builder itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Fmt {
    pub name: &'static str,
    pub ty: FmtType,
    pub num_components: usize,
    /// Per-component depth in bits; 0 for absent components.
    pub component_depth: [usize; 4],
    /// Size of one texel/element in bytes.
    pub texel_size: usize,
    pub caps: FmtCaps,
}
