use std::fmt;

/// A generated, collision-free identifier.
///
/// Identifiers are plain strings of the form `_{hint}_{counter}_{namespace}`
/// and are meant to be interpolated directly into shader text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fresh-identifier allocator: a monotonically increasing counter plus the
/// namespace tag baked into every produced name.
///
/// The counter makes names unique within one builder; the namespace tag
/// makes them unique across builders, so independently built program texts
/// can be concatenated into one compilation unit. The generator is a pure
/// value owned by its builder; there is no process-wide state.
#[derive(Debug, Clone)]
pub(crate) struct IdentGen {
    namespace: u8,
    counter: u32,
}

impl IdentGen {
    pub(crate) fn new(namespace: u8) -> Self {
        IdentGen {
            namespace,
            counter: 0,
        }
    }

    /// Produce a fresh identifier. `hint` is only for readability of the
    /// generated source; an empty hint falls back to `var`.
    pub(crate) fn fresh(&mut self, hint: &str) -> Ident {
        let hint = if hint.is_empty() { "var" } else { hint };
        let ident = Ident(format!("_{hint}_{}_{}", self.counter, self.namespace));
        self.counter += 1;
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_idents_are_pairwise_distinct() {
        let mut gen = IdentGen::new(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            assert!(seen.insert(gen.fresh("tmp")));
        }
        // Reusing a hint after other hints still never collides.
        assert!(seen.insert(gen.fresh("other")));
        assert!(seen.insert(gen.fresh("tmp")));
    }

    #[test]
    fn namespaces_keep_generators_disjoint() {
        let mut a = IdentGen::new(1);
        let mut b = IdentGen::new(2);
        let from_a: Vec<Ident> = (0..32).map(|_| a.fresh("x")).collect();
        let from_b: Vec<Ident> = (0..32).map(|_| b.fresh("x")).collect();
        for ident in &from_a {
            assert!(!from_b.contains(ident));
        }
    }

    #[test]
    fn empty_hint_falls_back_to_var() {
        let mut gen = IdentGen::new(0);
        assert_eq!(gen.fresh("").as_str(), "_var_0_0");
        assert_eq!(gen.fresh("seed").as_str(), "_seed_1_0");
    }
}
