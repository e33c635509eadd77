use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use lucent_ra::{Ra, RaCaps};
use tracing::{trace, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::ShaderError;
use crate::ident::{Ident, IdentGen};
use crate::output::ShaderOutput;
use crate::sig::ShaderSig;

/// The text buffers a builder accumulates source into.
///
/// Declarations and helper functions go into `Header`, the current stage's
/// statements into `Body`; `Prelude` holds text that must precede
/// everything else in the assembled program (version pragmas, enables).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderBuf {
    Prelude = 0,
    Header = 1,
    Body = 2,
}

const BUF_COUNT: usize = 3;

/// Mutable builder accumulating one mergeable shader program.
///
/// Obtained fresh (or [`reset`](Self::reset)) from whatever component pools
/// builders, driven by filter passes through the registry/append/require
/// operations, then frozen with [`finalize`](Self::finalize). A builder is
/// not safe for concurrent use; exactly one pass-construction sequence owns
/// it at a time.
pub struct ShaderBuilder {
    pub(crate) ra: Option<Arc<dyn Ra>>,
    pub(crate) mutable: bool,
    pub(crate) idents: IdentGen,
    pub(crate) buffers: [String; BUF_COUNT],
    pub(crate) out: ShaderOutput,

    // Required output size; 0 = unconstrained axis.
    pub(crate) output_w: u32,
    pub(crate) output_h: u32,

    pub(crate) is_compute: bool,
    pub(crate) flexible_work_groups: bool,

    // Binding-slot counters, indexed by the backend's descriptor namespace.
    pub(crate) bindings: Vec<usize>,

    // Cursors for vertex attributes.
    pub(crate) va_offset: usize,
    pub(crate) va_location: usize,
}

impl ShaderBuilder {
    /// A fresh builder. `namespace` disambiguates identifiers when the
    /// outputs of several builders are textually merged; whoever allocates
    /// builders is responsible for handing out distinct tags.
    ///
    /// Without a render abstraction the builder still works, but every
    /// GPU-dependent operation (descriptors, vertex attributes, compute)
    /// reports failure.
    pub fn new(ra: Option<Arc<dyn Ra>>, namespace: u8) -> Self {
        ShaderBuilder {
            ra,
            mutable: true,
            idents: IdentGen::new(namespace),
            buffers: Default::default(),
            out: ShaderOutput::default(),
            output_w: 0,
            output_h: 0,
            is_compute: false,
            flexible_work_groups: false,
            bindings: Vec::new(),
            va_offset: 0,
            va_location: 0,
        }
    }

    /// Reset in place for reuse under a new namespace tag.
    ///
    /// Clears accumulated text, registries and counters while keeping the
    /// underlying allocations, so a pooled builder does not re-grow its
    /// buffers every frame. Any previously finalized program text is
    /// released.
    pub fn reset(&mut self, namespace: u8) {
        self.mutable = true;
        self.idents = IdentGen::new(namespace);
        for buf in &mut self.buffers {
            buf.clear();
        }
        self.out.variables.clear();
        self.out.descriptors.clear();
        self.out.vertex_attribs.clear();
        self.out.input = ShaderSig::None;
        self.out.output = ShaderSig::None;
        self.out.wgsl = String::new();
        self.out.entry_point = None;
        self.out.compute_group_size = [0, 0];
        self.out.compute_shmem = 0;
        self.output_w = 0;
        self.output_h = 0;
        self.is_compute = false;
        self.flexible_work_groups = false;
        self.bindings.clear();
        self.va_offset = 0;
        self.va_location = 0;
    }

    /// Produce a fresh identifier for caller-defined helpers.
    pub fn fresh(&mut self, hint: &str) -> Ident {
        self.idents.fresh(hint)
    }

    /// Append formatted text to one of the builder's buffers.
    ///
    /// This is the raw accumulation primitive; it is the caller's job to
    /// gate shading operations through [`require`](Self::require) first.
    pub fn append(&mut self, buf: ShaderBuf, args: fmt::Arguments<'_>) {
        // Writing to a String cannot fail.
        let _ = self.buffers[buf as usize].write_fmt(args);
    }

    pub fn append_str(&mut self, buf: ShaderBuf, text: &str) {
        self.buffers[buf as usize].push_str(text);
    }

    /// Whether the builder currently describes a compute dispatch.
    pub fn is_compute(&self) -> bool {
        self.is_compute
    }

    /// The required output size, if both axes are constrained.
    pub fn output_size(&self) -> Option<(u32, u32)> {
        (self.output_w != 0 && self.output_h != 0).then_some((self.output_w, self.output_h))
    }

    /// Deterministic 64-bit signature of the accumulated text buffers.
    ///
    /// Used by external caches to detect that a previously compiled program
    /// can be reused. Only the text participates: descriptor and variable
    /// configuration deliberately do not affect the signature, so it is a
    /// text-identity key, not a full program-configuration key.
    pub fn content_signature(&self) -> u64 {
        self.buffers
            .iter()
            .fold(0u64, |sig, buf| sig ^ xxh3_64(buf.as_bytes()))
    }

    /// Gate a shading operation on the builder's composition state.
    ///
    /// `insig` is the signature the operation consumes and `(w, h)` the
    /// output size it requires (0 = unconstrained axis). On the first
    /// color-consuming operation the requirement becomes the program's
    /// input signature; afterwards the current output signature must match
    /// exactly. Every successful call ratchets the output signature to
    /// [`ShaderSig::Color`] and merges the size requirement; nothing ever
    /// reverts the output to `None`.
    pub fn require(&mut self, insig: ShaderSig, w: u32, h: u32) -> Result<(), ShaderError> {
        if !self.mutable {
            return Err(ShaderError::Immutable);
        }

        if (w != 0 && self.output_w != 0 && self.output_w != w)
            || (h != 0 && self.output_h != 0 && self.output_h != h)
        {
            return Err(ShaderError::OutputSizeMismatch {
                current_w: self.output_w,
                current_h: self.output_h,
                requested_w: w,
                requested_h: h,
            });
        }

        if self.out.output == ShaderSig::None && insig != ShaderSig::None {
            // No output to consume yet: the requirement becomes the entry
            // point's input signature. Happens at most once.
            debug_assert_eq!(self.out.input, ShaderSig::None);
            self.out.input = insig;
        } else if self.out.output != insig {
            return Err(ShaderError::SignatureMismatch {
                current: self.out.output,
                required: insig,
            });
        }

        // Every shading operation leaves a color value flowing.
        self.out.output = ShaderSig::Color;
        if w != 0 {
            self.output_w = w;
        }
        if h != 0 {
            self.output_h = h;
        }
        Ok(())
    }

    /// Try to turn this builder into (or merge into) a compute dispatch
    /// with the given workgroup size and shared-memory requirement.
    ///
    /// A `flexible` request lets the negotiator pick a larger group size;
    /// a rigid one pins it. Arbitrarily many flexible requests merge
    /// (element-wise maximum), a rigid request overrides any flexible
    /// state, and two rigid requests must agree exactly. On refusal the
    /// builder is left exactly as it was, so the caller can fall back to a
    /// raster pass.
    pub fn try_compute(&mut self, bw: u32, bh: u32, flexible: bool, shmem: usize) -> bool {
        assert!(bw > 0 && bh > 0, "workgroup dimensions must be non-zero");

        let Some(ra) = self.ra.as_deref() else {
            trace!("compute disabled: no render abstraction attached");
            return false;
        };
        if !ra.caps().contains(RaCaps::COMPUTE) {
            trace!("compute disabled: backend lacks compute support");
            return false;
        }
        let max_shmem = ra.limits().max_shmem_size;
        if self.out.compute_shmem + shmem > max_shmem {
            trace!(
                requested = shmem,
                used = self.out.compute_shmem,
                limit = max_shmem,
                "compute disabled: insufficient shared memory"
            );
            return false;
        }
        self.out.compute_shmem += shmem;

        // Not a compute shader yet, or a rigid request overriding a
        // flexible state: adopt the request wholesale.
        if !self.is_compute || (self.flexible_work_groups && !flexible) {
            self.out.compute_group_size = [bw, bh];
            self.flexible_work_groups = flexible;
            self.is_compute = true;
            return true;
        }

        // Two flexible requests merge to the larger footprint.
        if self.flexible_work_groups && flexible {
            let size = &mut self.out.compute_group_size;
            size[0] = size[0].max(bw);
            size[1] = size[1].max(bh);
            return true;
        }

        // Rigid state, flexible request: the request adapts to what is
        // already pinned.
        if flexible {
            return true;
        }

        // Both rigid: they must agree exactly.
        if self.out.compute_group_size != [bw, bh] {
            trace!(
                current_w = self.out.compute_group_size[0],
                current_h = self.out.compute_group_size[1],
                requested_w = bw,
                requested_h = bh,
                "compute disabled: incompatible workgroup sizes"
            );
            self.out.compute_shmem -= shmem;
            return false;
        }
        true
    }

    /// Freeze the builder and assemble the final program text.
    ///
    /// The accumulated body becomes the statements of a freshly named
    /// function whose parameter list and return type derive from the
    /// input/output signature; the prelude and header buffers are then
    /// concatenated into the complete text. Calling this a second time
    /// only logs a warning and re-returns the existing output.
    pub fn finalize(&mut self) -> &ShaderOutput {
        if !self.mutable {
            warn!("finalize called on an already-finalized shader");
            return &self.out;
        }

        let name = self.idents.fresh("main");
        let params = self.out.input.wgsl_param_list();
        let ret = self.out.output.wgsl_return_suffix();

        {
            let header = &mut self.buffers[ShaderBuf::Header as usize];
            let _ = writeln!(header, "fn {name}({params}){ret} {{");
            if self.out.input == ShaderSig::Color {
                // WGSL parameters are immutable; the body mutates `color`.
                header.push_str("var color = color_in;\n");
            }
        }

        // Move the body into the header as the function's statements,
        // keeping the body's allocation for reuse after reset.
        let (front, back) = self.buffers.split_at_mut(ShaderBuf::Body as usize);
        let header = &mut front[ShaderBuf::Header as usize];
        let body = &mut back[0];
        header.push_str(body);
        body.clear();

        match self.out.output {
            ShaderSig::None => {}
            ShaderSig::Color => header.push_str("return color;\n"),
        }
        header.push_str("}\n");

        let prelude = &self.buffers[ShaderBuf::Prelude as usize];
        let header = &self.buffers[ShaderBuf::Header as usize];
        let mut wgsl = String::with_capacity(prelude.len() + header.len());
        wgsl.push_str(prelude);
        wgsl.push_str(header);

        self.out.wgsl = wgsl;
        self.out.entry_point = Some(name);
        self.mutable = false;
        &self.out
    }
}
