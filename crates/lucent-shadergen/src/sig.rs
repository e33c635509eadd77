/// Logical type of the value flowing into or out of the program being
/// assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderSig {
    /// No value flows between stages.
    #[default]
    None,
    /// A 4-component color value flows between stages.
    Color,
}

impl ShaderSig {
    /// Parameter list of the finalized entry function for this input
    /// signature.
    ///
    /// The color parameter is named `color_in`; the finalizer shadows it
    /// with a mutable `color` local, which is the name the accumulated body
    /// operates on.
    pub(crate) fn wgsl_param_list(self) -> &'static str {
        match self {
            ShaderSig::None => "",
            ShaderSig::Color => "color_in: vec4<f32>",
        }
    }

    /// Return-type suffix of the finalized entry function for this output
    /// signature.
    pub(crate) fn wgsl_return_suffix(self) -> &'static str {
        match self {
            ShaderSig::None => "",
            ShaderSig::Color => " -> vec4<f32>",
        }
    }
}
