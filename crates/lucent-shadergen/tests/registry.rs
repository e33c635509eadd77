//! Resource registry bookkeeping: binding slots, vertex attribute cursors,
//! texture binding with derived declarations.

mod common;

use std::sync::Arc;

use common::{builder_with, test_ra};
use lucent_ra::test_utils::TestRa;
use lucent_ra::{DescType, Ra, Rect2Df, Var};
use lucent_shadergen::{BindAttrs, DescObject, ShaderBuilder, ShaderError, ShaderSig};
use pretty_assertions::assert_eq;

#[test]
fn binding_slots_number_independently_per_namespace() {
    let ra = test_ra();
    let mut sh = builder_with(&ra, 0);

    let tex = ra.tex_2d(16, 16);
    let buf = ra.buf(256);

    sh.desc(DescType::SampledTex, "lut", DescObject::Tex(tex.clone()))
        .unwrap();
    sh.desc(DescType::SampledTex, "src", DescObject::Tex(tex.clone()))
        .unwrap();
    sh.desc(DescType::BufUniform, "params", DescObject::Buf(buf))
        .unwrap();
    sh.desc(DescType::StorageImg, "dst", DescObject::Tex(tex))
        .unwrap();

    let out = sh.finalize();
    let slots: Vec<(DescType, usize)> = out
        .descriptors
        .iter()
        .map(|desc| (desc.ty, desc.binding))
        .collect();
    assert_eq!(
        slots,
        vec![
            (DescType::SampledTex, 0),
            (DescType::SampledTex, 1),
            (DescType::BufUniform, 0),
            (DescType::StorageImg, 0),
        ]
    );
}

#[test]
fn vertex_attribute_cursors_advance_monotonically() {
    let ra = test_ra();
    let mut sh = builder_with(&ra, 0);

    let rect = Rect2Df::from_extent(1.0, 1.0);
    for name in ["a", "b", "c"] {
        sh.attr_vec2(name, &rect).unwrap();
    }

    let out = sh.finalize();
    assert_eq!(out.vertex_attribs.len(), 3);
    for (index, attr) in out.vertex_attribs.iter().enumerate() {
        // The test backend's 2-component float vertex format is 8 bytes.
        assert_eq!(attr.offset, index * 8);
        assert_eq!(attr.location, index);
    }
}

#[test]
fn attr_vec2_packs_rect_corners() {
    let ra = test_ra();
    let mut sh = builder_with(&ra, 0);

    sh.attr_vec2("pos", &Rect2Df::new(-1.0, -1.0, 1.0, 1.0)).unwrap();
    let out = sh.finalize();
    assert_eq!(
        out.vertex_attribs[0].data,
        [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]]
    );
}

#[test]
fn bind_tex_declares_requested_attributes() {
    let ra = test_ra();
    let mut sh = builder_with(&ra, 0);
    let tex = ra.tex_2d(64, 32);

    let bound = sh
        .bind_tex(
            &tex,
            "src",
            None,
            BindAttrs::POS | BindAttrs::SIZE | BindAttrs::INV_SIZE,
        )
        .unwrap();
    assert!(bound.pos.is_some());
    assert!(bound.size.is_some());
    assert!(bound.inv_size.is_some());

    let out = sh.finalize();
    assert_eq!(out.descriptors.len(), 1);
    assert_eq!(out.descriptors[0].ty, DescType::SampledTex);
    assert_eq!(out.descriptors[0].binding, 0);

    // Position defaults to the full extent, normalized.
    assert_eq!(
        out.vertex_attribs[0].data,
        [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
    );

    // size = (w, h), inv_size = (1/w, 1/h).
    assert_eq!(out.variables.len(), 2);
    assert_eq!(out.variables[0].data, bytemuck::bytes_of(&[64.0f32, 32.0]));
    assert_eq!(
        out.variables[1].data,
        bytemuck::bytes_of(&[1.0f32 / 64.0, 1.0 / 32.0])
    );
}

#[test]
fn bind_tex_normalizes_source_rect() {
    let ra = test_ra();
    let mut sh = builder_with(&ra, 0);
    let tex = ra.tex_2d(64, 32);

    sh.bind_tex(
        &tex,
        "src",
        Some(Rect2Df::new(16.0, 8.0, 48.0, 24.0)),
        BindAttrs::POS,
    )
    .unwrap();

    let out = sh.finalize();
    assert_eq!(
        out.vertex_attribs[0].data,
        [[0.25, 0.25], [0.75, 0.25], [0.25, 0.75], [0.75, 0.75]]
    );
}

#[test]
fn bind_tex_without_wants_only_declares_the_descriptor() {
    let ra = test_ra();
    let mut sh = builder_with(&ra, 0);
    let tex = ra.tex_2d(8, 8);

    let bound = sh.bind_tex(&tex, "src", None, BindAttrs::empty()).unwrap();
    assert!(bound.pos.is_none());
    assert!(bound.size.is_none());
    assert!(bound.inv_size.is_none());

    let out = sh.finalize();
    assert_eq!(out.descriptors.len(), 1);
    assert!(out.vertex_attribs.is_empty());
    assert!(out.variables.is_empty());
}

#[test]
fn missing_vertex_format_aborts_bind_without_side_effects() {
    let mut backend = TestRa::new();
    backend.clear_vertex_fmts();
    let ra = Arc::new(backend);
    let tex = ra.tex_2d(8, 8);

    let mut sh = ShaderBuilder::new(Some(ra.clone() as Arc<dyn Ra>), 0);
    let err = sh.bind_tex(&tex, "src", None, BindAttrs::POS).unwrap_err();
    assert!(matches!(err, ShaderError::NoVertexFormat { .. }));

    // The failed call left the registry untouched.
    let out = sh.finalize();
    assert!(out.descriptors.is_empty());
    assert!(out.vertex_attribs.is_empty());
}

#[test]
fn declared_identifiers_are_pairwise_distinct() {
    let ra = test_ra();
    let mut sh = builder_with(&ra, 3);
    let tex = ra.tex_2d(16, 16);

    let mut names = vec![
        sh.var_pod(Var::float("gamma"), &2.2f32).to_string(),
        sh.desc(DescType::SampledTex, "src", DescObject::Tex(tex))
            .unwrap()
            .to_string(),
        sh.attr_vec2("pos", &Rect2Df::from_extent(1.0, 1.0))
            .unwrap()
            .to_string(),
        sh.fresh("tmp").to_string(),
        sh.lut_pos(64).to_string(),
    ];
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 5);
}

#[test]
fn lut_pos_emits_header_helper() {
    let ra = test_ra();
    let mut sh = builder_with(&ra, 0);
    sh.require(ShaderSig::None, 0, 0).unwrap();
    let lut_pos = sh.lut_pos(64);
    sh.append(
        lucent_shadergen::ShaderBuf::Body,
        format_args!("var color = vec4<f32>({lut_pos}(0.5));\n"),
    );

    let out = sh.finalize();
    assert!(out
        .wgsl
        .contains(&format!("fn {lut_pos}(x: f32) -> f32 {{")));
    assert!(out.wgsl.contains("mix(f32(0.0078125), f32(0.9921875), x)"));
}
