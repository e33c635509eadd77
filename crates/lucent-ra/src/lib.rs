//! `lucent-ra` is the render abstraction ("RA") interface layer of Lucent.
//!
//! It defines the surface a GPU backend exposes to the shader builder in
//! `lucent-shadergen`:
//! - capability flags and resource limits ([`RaCaps`], [`RaLimits`]),
//! - texel/vertex format descriptions ([`Fmt`]) and the vertex-format lookup,
//! - opaque texture/buffer handles ([`Tex`], [`Buf`]),
//! - typed shader-variable descriptions and their host layout ([`Var`]),
//! - the descriptor-binding-namespace function ([`Ra::desc_namespace`]).
//!
//! Concrete backends (wgpu, Vulkan, ...) live in their own crates and
//! implement [`Ra`]; this crate carries no GPU code. The `test-utils`
//! feature provides a configurable in-memory backend for tests.

mod fmt;
mod ra;
mod rect;
mod tex;
mod var;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use fmt::{Fmt, FmtCaps, FmtType};
pub use ra::{DescType, Ra, RaCaps, RaLimits};
pub use rect::Rect2Df;
pub use tex::{Buf, BufParams, Tex, TexParams};
pub use var::{Var, VarLayout, VarType};
