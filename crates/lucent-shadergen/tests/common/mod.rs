use std::sync::Arc;

use lucent_ra::test_utils::TestRa;
use lucent_ra::Ra;
use lucent_shadergen::ShaderBuilder;

pub fn test_ra() -> Arc<TestRa> {
    Arc::new(TestRa::new())
}

pub fn builder_with(ra: &Arc<TestRa>, namespace: u8) -> ShaderBuilder {
    ShaderBuilder::new(Some(ra.clone() as Arc<dyn Ra>), namespace)
}
