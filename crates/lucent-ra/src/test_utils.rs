//! Minimal in-memory backend used by tests across the workspace.
//!
//! `TestRa` implements just enough of [`Ra`] to exercise the shader
//! builder: configurable caps/limits, a tiny format table, and a
//! per-class descriptor-namespace partition so slot bookkeeping is
//! actually visible in tests.

use std::sync::Arc;

use crate::{
    Buf, BufParams, DescType, Fmt, FmtCaps, FmtType, Ra, RaCaps, RaLimits, Tex, TexParams,
};

pub struct TestRa {
    caps: RaCaps,
    limits: RaLimits,
    formats: Vec<Arc<Fmt>>,
}

impl TestRa {
    /// Backend with compute enabled and a 4 KiB shared-memory budget.
    pub fn new() -> Self {
        Self::with_caps(RaCaps::COMPUTE | RaCaps::INPUT_VARIABLES)
    }

    /// Backend that reports no compute support (and no shmem budget).
    pub fn without_compute() -> Self {
        let mut ra = Self::with_caps(RaCaps::INPUT_VARIABLES);
        ra.limits.max_shmem_size = 0;
        ra
    }

    pub fn with_caps(caps: RaCaps) -> Self {
        TestRa {
            caps,
            limits: RaLimits {
                max_shmem_size: 4096,
                max_tex_2d_dim: 16384,
                max_group_threads: 1024,
            },
            formats: default_formats(),
        }
    }

    pub fn set_limits(&mut self, limits: RaLimits) {
        self.limits = limits;
    }

    /// Drop every vertex-capable format, to exercise lookup failures.
    pub fn clear_vertex_fmts(&mut self) {
        self.formats.retain(|fmt| !fmt.caps.contains(FmtCaps::VERTEX));
    }

    /// A sampleable 2D texture handle of the given size.
    pub fn tex_2d(&self, w: u32, h: u32) -> Arc<dyn Tex> {
        let format = self
            .formats
            .iter()
            .find(|fmt| fmt.name == "rgba8")
            .expect("test format table always contains rgba8")
            .clone();
        Arc::new(TestTex {
            params: TexParams {
                w,
                h,
                d: 0,
                format,
                sampleable: true,
                renderable: true,
                storable: false,
            },
        })
    }

    /// A uniform-capable buffer handle of the given size.
    pub fn buf(&self, size: usize) -> Arc<dyn Buf> {
        Arc::new(TestBuf {
            params: BufParams {
                size,
                uniform: true,
                storable: false,
            },
        })
    }
}

impl Default for TestRa {
    fn default() -> Self {
        Self::new()
    }
}

impl Ra for TestRa {
    fn caps(&self) -> RaCaps {
        self.caps
    }

    fn limits(&self) -> &RaLimits {
        &self.limits
    }

    fn desc_namespace(&self, ty: DescType) -> usize {
        // One partition per descriptor class, D3D-style.
        match ty {
            DescType::SampledTex => 0,
            DescType::StorageImg => 1,
            DescType::BufUniform => 2,
            DescType::BufStorage => 3,
        }
    }

    fn find_vertex_fmt(&self, ty: FmtType, components: usize) -> Option<Arc<Fmt>> {
        self.formats
            .iter()
            .find(|fmt| {
                fmt.ty == ty
                    && fmt.num_components == components
                    && fmt.caps.contains(FmtCaps::VERTEX)
            })
            .cloned()
    }
}

fn default_formats() -> Vec<Arc<Fmt>> {
    vec![
        Arc::new(Fmt {
            name: "rg32f",
            ty: FmtType::Float,
            num_components: 2,
            component_depth: [32, 32, 0, 0],
            texel_size: 8,
            caps: FmtCaps::VERTEX | FmtCaps::SAMPLEABLE | FmtCaps::LINEAR,
        }),
        Arc::new(Fmt {
            name: "rgba32f",
            ty: FmtType::Float,
            num_components: 4,
            component_depth: [32, 32, 32, 32],
            texel_size: 16,
            caps: FmtCaps::VERTEX
                | FmtCaps::SAMPLEABLE
                | FmtCaps::RENDERABLE
                | FmtCaps::LINEAR,
        }),
        Arc::new(Fmt {
            name: "rgba8",
            ty: FmtType::Unorm,
            num_components: 4,
            component_depth: [8, 8, 8, 8],
            texel_size: 4,
            caps: FmtCaps::SAMPLEABLE | FmtCaps::RENDERABLE | FmtCaps::LINEAR,
        }),
    ]
}

pub struct TestTex {
    params: TexParams,
}

impl Tex for TestTex {
    fn params(&self) -> &TexParams {
        &self.params
    }
}

pub struct TestBuf {
    params: BufParams,
}

impl Buf for TestBuf {
    fn params(&self) -> &BufParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_fmt_lookup_honors_caps() {
        let ra = TestRa::new();
        let fmt = ra.find_vertex_fmt(FmtType::Float, 2).unwrap();
        assert_eq!(fmt.name, "rg32f");
        assert_eq!(fmt.texel_size, 8);

        // rgba8 exists but is not vertex-capable.
        assert!(ra.find_vertex_fmt(FmtType::Unorm, 4).is_none());
    }

    #[test]
    fn namespaces_partition_by_class() {
        let ra = TestRa::new();
        let namespaces: Vec<usize> = [
            DescType::SampledTex,
            DescType::StorageImg,
            DescType::BufUniform,
            DescType::BufStorage,
        ]
        .into_iter()
        .map(|ty| ra.desc_namespace(ty))
        .collect();
        let mut deduped = namespaces.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), namespaces.len());
    }
}
