//! Procedural shader-program builder for the Lucent render abstraction.
//!
//! Filter passes (color management, scaling, debanding, ...) each append
//! WGSL source fragments, declare variables, descriptors and vertex
//! attributes into a shared [`ShaderBuilder`]. Several passes can be merged
//! into one compiled program; the builder is what makes that safe:
//! - every generated identifier embeds a per-builder namespace tag, so the
//!   outputs of independently built programs can be concatenated without
//!   collisions ([`Ident`]);
//! - a small signature state machine tracks the value flowing between
//!   composed passes and rejects illegal sequences
//!   ([`ShaderBuilder::require`]);
//! - compute requirements (workgroup size, shared memory) from multiple
//!   passes are reconciled into one dispatch
//!   ([`ShaderBuilder::try_compute`]).
//!
//! Finalizing wraps the accumulated body into a single callable function
//! and yields a [`ShaderOutput`] a backend can compile and run. The builder
//! never validates or compiles the text it assembles.

mod builder;
mod error;
mod ident;
mod object;
mod output;
mod registry;
mod sig;

pub use builder::{ShaderBuf, ShaderBuilder};
pub use error::ShaderError;
pub use ident::Ident;
pub use object::{ShaderObj, ShaderObjType};
pub use output::{DescObject, ShaderDescBinding, ShaderOutput, ShaderVar, ShaderVertexAttrib};
pub use registry::{BindAttrs, TexBinding};
pub use sig::ShaderSig;
