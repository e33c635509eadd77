use thiserror::Error;

use crate::object::ShaderObjType;
use crate::sig::ShaderSig;

/// Errors reported by builder operations.
///
/// All of these are caller-recoverable: the builder remains usable after
/// any of them, and composition errors leave its state untouched. Contract
/// violations (zero-sized workgroups, wrong payload sizes, binding a non-2D
/// texture) are asserts instead, since they indicate a defect in the
/// calling code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    /// A backend-dependent declaration was attempted with no render
    /// abstraction attached to the builder.
    #[error("no render abstraction attached while declaring {what}")]
    NoRa { what: String },

    /// The backend has no vertex-capable 2-component float format.
    #[error("no suitable vertex format for attribute '{name}'")]
    NoVertexFormat { name: String },

    /// Composition order is wrong: the builder's current output signature
    /// does not satisfy the operation's input requirement.
    #[error(
        "illegal sequence of shader operations: current output signature is \
         {current:?} but the operation expects {required:?}"
    )]
    SignatureMismatch {
        current: ShaderSig,
        required: ShaderSig,
    },

    /// Two stages disagree on the frame size they operate over.
    #[error(
        "incompatible output size requirements: {current_w}x{current_h} vs \
         {requested_w}x{requested_h}"
    )]
    OutputSizeMismatch {
        current_w: u32,
        current_h: u32,
        requested_w: u32,
        requested_h: u32,
    },

    /// The builder was already finalized.
    #[error("attempted to modify a finalized shader")]
    Immutable,

    /// A shader object created against one render abstraction was passed to
    /// a builder using a different one.
    #[error("shader object belongs to a different render abstraction")]
    ObjectRaMismatch,

    /// A shader object was reused with a different type than it was created
    /// with.
    #[error("shader object is a {found:?}, but the operation expects a {expected:?}")]
    ObjectTypeMismatch {
        found: ShaderObjType,
        expected: ShaderObjType,
    },
}
