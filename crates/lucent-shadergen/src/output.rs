use std::fmt;
use std::sync::Arc;

use lucent_ra::{Buf, DescType, Fmt, Tex, Var};

use crate::ident::Ident;
use crate::sig::ShaderSig;

/// Backend object recorded with a descriptor.
///
/// The builder only records the reference; the resource's lifetime is
/// managed by whoever created it.
#[derive(Clone)]
pub enum DescObject {
    None,
    Tex(Arc<dyn Tex>),
    Buf(Arc<dyn Buf>),
}

impl fmt::Debug for DescObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescObject::None => f.write_str("None"),
            DescObject::Tex(_) => f.write_str("Tex(..)"),
            DescObject::Buf(_) => f.write_str("Buf(..)"),
        }
    }
}

/// A registered variable: its renamed description plus the payload, which
/// was deep-copied out of the caller's buffer at registration time.
#[derive(Debug, Clone)]
pub struct ShaderVar {
    pub var: Var,
    pub data: Vec<u8>,
}

/// A registered descriptor with its assigned binding slot.
#[derive(Debug, Clone)]
pub struct ShaderDescBinding {
    pub name: Ident,
    pub ty: DescType,
    /// Slot within the backend-defined partition for `ty`.
    pub binding: usize,
    pub object: DescObject,
}

/// A registered vertex attribute with its packed per-vertex data.
#[derive(Debug, Clone)]
pub struct ShaderVertexAttrib {
    pub name: Ident,
    pub fmt: Arc<Fmt>,
    /// Byte offset within the interleaved vertex.
    pub offset: usize,
    /// Vertex-shader location; each vec2 attribute consumes one slot.
    pub location: usize,
    /// Corner vertices in (top-left, top-right, bottom-left, bottom-right)
    /// order.
    pub data: [[f32; 2]; 4],
}

/// The builder's externally visible accumulation.
///
/// Filled incrementally while the builder is mutable; `wgsl` and
/// `entry_point` are set by finalization, which freezes the whole struct.
/// A backend consumes this to create and dispatch the actual program.
#[derive(Debug, Clone, Default)]
pub struct ShaderOutput {
    pub variables: Vec<ShaderVar>,
    pub descriptors: Vec<ShaderDescBinding>,
    pub vertex_attribs: Vec<ShaderVertexAttrib>,
    pub input: ShaderSig,
    pub output: ShaderSig,
    /// Complete program text; empty until finalization.
    pub wgsl: String,
    /// Entry-point function name; `None` until finalization.
    pub entry_point: Option<Ident>,
    /// Workgroup size; meaningful only when the builder reports compute.
    pub compute_group_size: [u32; 2],
    /// Total workgroup shared memory in bytes across all merged passes.
    pub compute_shmem: usize,
}
