use std::sync::Arc;

use lucent_ra::{Buf, Ra, Tex};

use crate::builder::ShaderBuilder;
use crate::error::ShaderError;

/// Tag identifying what kind of persistent state a shader object holds.
///
/// An object may only ever be reused with the type it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderObjType {
    /// A cached lookup table.
    Lut,
    /// Running peak-detection state carried across frames.
    PeakDetect,
}

/// Persistent, typed state a filter keeps alive across invocations (e.g. a
/// cached lookup texture).
///
/// The object is owned by the calling filter, not by any builder. `tex` and
/// `buf` start empty and are free for the owning filter to attach; whatever
/// is attached is released when the object is dropped (dropping an empty
/// `Option<ShaderObj>` slot releases nothing).
pub struct ShaderObj {
    ty: ShaderObjType,
    ra: Option<Arc<dyn Ra>>,
    pub tex: Option<Arc<dyn Tex>>,
    pub buf: Option<Arc<dyn Buf>>,
}

impl ShaderObj {
    pub fn ty(&self) -> ShaderObjType {
        self.ty
    }
}

impl ShaderBuilder {
    /// Ensure `slot` holds an object of type `ty` belonging to this
    /// builder's render abstraction, allocating an empty one if the slot is
    /// vacant.
    ///
    /// A populated slot whose type or backend does not match is a caller
    /// bug: the mismatch is reported and the slot left untouched, never
    /// auto-corrected.
    pub fn require_object(
        &self,
        slot: &mut Option<ShaderObj>,
        ty: ShaderObjType,
    ) -> Result<(), ShaderError> {
        if let Some(obj) = slot {
            let same_ra = match (&obj.ra, &self.ra) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            if !same_ra {
                return Err(ShaderError::ObjectRaMismatch);
            }
            if obj.ty != ty {
                return Err(ShaderError::ObjectTypeMismatch {
                    found: obj.ty,
                    expected: ty,
                });
            }
            return Ok(());
        }

        *slot = Some(ShaderObj {
            ty,
            ra: self.ra.clone(),
            tex: None,
            buf: None,
        });
        Ok(())
    }
}
