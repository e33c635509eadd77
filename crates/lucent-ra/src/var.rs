use std::mem::size_of;

/// Scalar base type of a shader variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Sint,
    Uint,
    Float,
}

impl VarType {
    /// Host size of one scalar of this type, in bytes.
    pub fn size(self) -> usize {
        match self {
            VarType::Sint => size_of::<i32>(),
            VarType::Uint => size_of::<u32>(),
            VarType::Float => size_of::<f32>(),
        }
    }
}

/// Host memory layout of a variable: where it starts, how wide one column
/// is, and how many bytes it occupies in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarLayout {
    pub offset: usize,
    pub stride: usize,
    pub size: usize,
}

/// Description of a loose shader input variable.
///
/// `name` is only a hint: the builder replaces it with a collision-free
/// identifier when the variable is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub name: String,
    pub ty: VarType,
    /// Vector width (1 for scalars).
    pub dim_v: usize,
    /// Matrix column count (1 for vectors and scalars).
    pub dim_m: usize,
    /// Array length (1 for non-arrays).
    pub dim_a: usize,
}

impl Var {
    fn base(name: &str, ty: VarType, dim_m: usize, dim_v: usize) -> Self {
        Var {
            name: name.to_owned(),
            ty,
            dim_v,
            dim_m,
            dim_a: 1,
        }
    }

    pub fn uint(name: &str) -> Self {
        Var::base(name, VarType::Uint, 1, 1)
    }

    pub fn float(name: &str) -> Self {
        Var::base(name, VarType::Float, 1, 1)
    }

    pub fn vec2(name: &str) -> Self {
        Var::base(name, VarType::Float, 1, 2)
    }

    pub fn vec3(name: &str) -> Self {
        Var::base(name, VarType::Float, 1, 3)
    }

    pub fn vec4(name: &str) -> Self {
        Var::base(name, VarType::Float, 1, 4)
    }

    pub fn mat2(name: &str) -> Self {
        Var::base(name, VarType::Float, 2, 2)
    }

    pub fn mat3(name: &str) -> Self {
        Var::base(name, VarType::Float, 3, 3)
    }

    pub fn mat4(name: &str) -> Self {
        Var::base(name, VarType::Float, 4, 4)
    }

    /// WGSL spelling of this variable's type, or `None` for shapes WGSL
    /// cannot express (e.g. integer matrices).
    ///
    /// Array-ness is not part of the spelling; `dim_a` only affects the
    /// host layout.
    pub fn wgsl_type_name(&self) -> Option<&'static str> {
        Some(match (self.ty, self.dim_m, self.dim_v) {
            (VarType::Float, 1, 1) => "f32",
            (VarType::Float, 1, 2) => "vec2<f32>",
            (VarType::Float, 1, 3) => "vec3<f32>",
            (VarType::Float, 1, 4) => "vec4<f32>",
            (VarType::Float, 2, 2) => "mat2x2<f32>",
            (VarType::Float, 2, 3) => "mat2x3<f32>",
            (VarType::Float, 2, 4) => "mat2x4<f32>",
            (VarType::Float, 3, 2) => "mat3x2<f32>",
            (VarType::Float, 3, 3) => "mat3x3<f32>",
            (VarType::Float, 3, 4) => "mat3x4<f32>",
            (VarType::Float, 4, 2) => "mat4x2<f32>",
            (VarType::Float, 4, 3) => "mat4x3<f32>",
            (VarType::Float, 4, 4) => "mat4x4<f32>",
            (VarType::Sint, 1, 1) => "i32",
            (VarType::Sint, 1, 2) => "vec2<i32>",
            (VarType::Sint, 1, 3) => "vec3<i32>",
            (VarType::Sint, 1, 4) => "vec4<i32>",
            (VarType::Uint, 1, 1) => "u32",
            (VarType::Uint, 1, 2) => "vec2<u32>",
            (VarType::Uint, 1, 3) => "vec3<u32>",
            (VarType::Uint, 1, 4) => "vec4<u32>",
            _ => return None,
        })
    }

    /// Tightly packed host layout of this variable, starting at `offset`.
    ///
    /// Columns are stored contiguously; matrices and arrays are sequences
    /// of columns with no padding.
    pub fn host_layout(&self, offset: usize) -> VarLayout {
        let col_size = self.ty.size() * self.dim_v;
        VarLayout {
            offset,
            stride: col_size,
            size: col_size * self.dim_m * self.dim_a,
        }
    }
}
