use std::sync::Arc;

use bitflags::bitflags;
use bytemuck::NoUninit;
use lucent_ra::{DescType, FmtType, Rect2Df, Tex, Var};

use crate::builder::{ShaderBuf, ShaderBuilder};
use crate::error::ShaderError;
use crate::ident::Ident;
use crate::output::{DescObject, ShaderDescBinding, ShaderVar, ShaderVertexAttrib};

bitflags! {
    /// Extra declarations emitted alongside a texture binding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BindAttrs: u32 {
        /// Normalized source position as a vec2 vertex attribute.
        const POS = 1 << 0;
        /// Texture size in texels as a vec2 variable.
        const SIZE = 1 << 1;
        /// Reciprocal texture size as a vec2 variable.
        const INV_SIZE = 1 << 2;
    }
}

/// Identifiers produced by [`ShaderBuilder::bind_tex`]. Fields other than
/// the texture itself are present iff they were requested.
#[derive(Debug, Clone)]
pub struct TexBinding {
    pub tex: Ident,
    pub pos: Option<Ident>,
    pub size: Option<Ident>,
    pub inv_size: Option<Ident>,
}

impl ShaderBuilder {
    /// Register a loose input variable and return its unique identifier.
    ///
    /// `data` is copied into builder-owned storage, so the caller's buffer
    /// may be transient. Its length must match the variable's host layout
    /// size exactly.
    pub fn var(&mut self, mut var: Var, data: &[u8]) -> Ident {
        let layout = var.host_layout(0);
        assert_eq!(
            data.len(),
            layout.size,
            "variable payload must match the host layout size"
        );

        let name = self.idents.fresh(&var.name);
        var.name = name.as_str().to_owned();
        self.out.variables.push(ShaderVar {
            var,
            data: data.to_vec(),
        });
        name
    }

    /// [`var`](Self::var) for any plain-old-data value.
    pub fn var_pod<T: NoUninit>(&mut self, var: Var, value: &T) -> Ident {
        self.var(var, bytemuck::bytes_of(value))
    }

    /// Register a descriptor and return its unique identifier.
    ///
    /// The binding slot is assigned by incrementing the counter of the
    /// backend-defined namespace partition for `ty`; independent partitions
    /// number independently starting at zero.
    pub fn desc(
        &mut self,
        ty: DescType,
        name: &str,
        object: DescObject,
    ) -> Result<Ident, ShaderError> {
        let ra = self.ra.clone().ok_or_else(|| ShaderError::NoRa {
            what: format!("descriptor '{name}'"),
        })?;

        let namespace = ra.desc_namespace(ty);
        if self.bindings.len() <= namespace {
            self.bindings.resize(namespace + 1, 0);
        }
        let binding = self.bindings[namespace];
        self.bindings[namespace] += 1;

        let ident = self.idents.fresh(name);
        self.out.descriptors.push(ShaderDescBinding {
            name: ident.clone(),
            ty,
            binding,
            object,
        });
        Ok(ident)
    }

    /// Register a vec2 vertex attribute holding the four corners of `rc`.
    ///
    /// The attribute is assigned the next byte offset and vertex-shader
    /// location; every vec2 attribute consumes exactly one location slot.
    pub fn attr_vec2(&mut self, name: &str, rc: &Rect2Df) -> Result<Ident, ShaderError> {
        let ra = self.ra.clone().ok_or_else(|| ShaderError::NoRa {
            what: format!("vertex attribute '{name}'"),
        })?;
        let fmt = ra
            .find_vertex_fmt(FmtType::Float, 2)
            .ok_or_else(|| ShaderError::NoVertexFormat {
                name: name.to_owned(),
            })?;

        let data = [
            [rc.x0, rc.y0],
            [rc.x1, rc.y0],
            [rc.x0, rc.y1],
            [rc.x1, rc.y1],
        ];

        let ident = self.idents.fresh(name);
        self.out.vertex_attribs.push(ShaderVertexAttrib {
            name: ident.clone(),
            offset: self.va_offset,
            location: self.va_location,
            data,
            fmt: fmt.clone(),
        });
        self.va_offset += fmt.texel_size;
        self.va_location += 1;
        Ok(ident)
    }

    /// Bind a 2D texture as a sampled descriptor and optionally declare its
    /// derived attributes in the same call.
    ///
    /// `rect` selects the source region for the normalized position
    /// attribute and defaults to the full texture extent. Prerequisites are
    /// checked up front, so a failing call leaves the registry untouched.
    pub fn bind_tex(
        &mut self,
        tex: &Arc<dyn Tex>,
        name: &str,
        rect: Option<Rect2Df>,
        attrs: BindAttrs,
    ) -> Result<TexBinding, ShaderError> {
        let ra = self.ra.clone().ok_or_else(|| ShaderError::NoRa {
            what: format!("texture binding '{name}'"),
        })?;
        let params = tex.params();
        assert_eq!(
            params.dimension(),
            2,
            "only 2D textures can be bound as sampled sources"
        );
        let w = params.w as f32;
        let h = params.h as f32;

        if attrs.contains(BindAttrs::POS) && ra.find_vertex_fmt(FmtType::Float, 2).is_none() {
            return Err(ShaderError::NoVertexFormat {
                name: name.to_owned(),
            });
        }

        let itex = self.desc(DescType::SampledTex, name, DescObject::Tex(tex.clone()))?;

        let pos = if attrs.contains(BindAttrs::POS) {
            let rc = rect.unwrap_or_else(|| Rect2Df::from_extent(w, h));
            let normalized = Rect2Df::new(rc.x0 / w, rc.y0 / h, rc.x1 / w, rc.y1 / h);
            Some(self.attr_vec2("pos", &normalized)?)
        } else {
            None
        };

        let size = attrs
            .contains(BindAttrs::SIZE)
            .then(|| self.var_pod(Var::vec2("size"), &[w, h]));
        let inv_size = attrs
            .contains(BindAttrs::INV_SIZE)
            .then(|| self.var_pod(Var::vec2("inv_size"), &[1.0 / w, 1.0 / h]));

        Ok(TexBinding {
            tex: itex,
            pos,
            size,
            inv_size,
        })
    }

    /// Emit a helper mapping a normalized coordinate onto the texel centers
    /// of a lookup table with `lut_size` entries, and return its name.
    ///
    /// Sampling a LUT at exactly 0.0 or 1.0 would interpolate past the
    /// outermost entries; the helper clamps the range to their centers.
    pub fn lut_pos(&mut self, lut_size: usize) -> Ident {
        assert!(lut_size > 0, "lookup table must have at least one entry");

        let name = self.idents.fresh("lut_pos");
        let lo = 0.5 / lut_size as f64;
        let hi = 1.0 - 0.5 / lut_size as f64;
        self.append(
            ShaderBuf::Header,
            format_args!("fn {name}(x: f32) -> f32 {{\nreturn mix(f32({lo}), f32({hi}), x);\n}}\n"),
        );
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backendless_builder_rejects_gpu_declarations() {
        let mut sh = ShaderBuilder::new(None, 0);
        assert!(matches!(
            sh.desc(DescType::SampledTex, "tex", DescObject::None),
            Err(ShaderError::NoRa { .. })
        ));
        assert!(matches!(
            sh.attr_vec2("pos", &Rect2Df::from_extent(1.0, 1.0)),
            Err(ShaderError::NoRa { .. })
        ));
    }

    #[test]
    fn var_copies_payload_and_renames() {
        let mut sh = ShaderBuilder::new(None, 2);
        let ident = {
            // The caller's buffer is transient; the payload is copied.
            let data = [0.5f32, 0.25];
            sh.var_pod(Var::vec2("seed"), &data)
        };

        let out = sh.finalize();
        assert_eq!(out.variables.len(), 1);
        let sv = &out.variables[0];
        assert_eq!(sv.var.name, ident.as_str());
        assert_eq!(sv.data, bytemuck::bytes_of(&[0.5f32, 0.25]));
    }
}
