use std::sync::Arc;

use bitflags::bitflags;

use crate::fmt::{Fmt, FmtType};

bitflags! {
    /// Optional backend capabilities the builder may query before enabling
    /// a feature.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RaCaps: u32 {
        /// Compute dispatch is supported.
        const COMPUTE = 1 << 0;
        /// Loose input variables (non-buffer uniforms) are supported.
        const INPUT_VARIABLES = 1 << 1;
    }
}

/// Backend resource limits relevant to shader construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaLimits {
    /// Workgroup shared-memory budget in bytes. 0 when compute is
    /// unsupported.
    pub max_shmem_size: usize,
    pub max_tex_2d_dim: u32,
    pub max_group_threads: u32,
}

/// Class of a bound shader resource (descriptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescType {
    SampledTex,
    StorageImg,
    BufUniform,
    BufStorage,
}

/// The render abstraction interface.
///
/// A backend implements this to let the shader builder query capabilities,
/// limits, binding-slot partitioning and vertex formats. Resource creation,
/// program compilation and execution live entirely on the backend side.
pub trait Ra {
    fn caps(&self) -> RaCaps;

    fn limits(&self) -> &RaLimits;

    /// Binding-slot partition for a descriptor class.
    ///
    /// Slots number independently from zero within each partition, so two
    /// descriptor classes mapped to different partitions never contend for
    /// slot numbers. How classes are partitioned is entirely up to the
    /// backend's own slot-numbering scheme.
    fn desc_namespace(&self, ty: DescType) -> usize;

    /// A vertex-capable format with the given base type and component
    /// count, or `None` if the backend has no such format.
    fn find_vertex_fmt(&self, ty: FmtType, components: usize) -> Option<Arc<Fmt>>;
}
