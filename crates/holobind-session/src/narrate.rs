//! The natural-language surface generator's seam.
//!
//! Exact sentence phrasing is treated as a free, swappable design rather
//! than part of the core contract — this module supplies a minimal
//! default rather than a full NL pipeline, which belongs with whatever
//! external surface generator an embedder wires up separately.

/// Turns a decoded `(operator, args)` tuple into a sentence.
///
/// Implementations never fail: an operator or argument this generator
/// has no special phrasing for still produces readable (if plain) text.
pub trait NarrativeGenerator {
    /// Renders one `(operator, args)` tuple as a sentence.
    fn sentence(&self, operator: &str, args: &[String]) -> String;
}

/// A small set of hand-phrased templates for the transitive/relational
/// operators the prover knows about, falling back to a generic
/// `operator arg1 arg2 ...` rendering for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNarrator;

impl NarrativeGenerator for DefaultNarrator {
    fn sentence(&self, operator: &str, args: &[String]) -> String {
        match (operator, args) {
            ("isA", [subject, class]) => format!("{} is a {}.", subject, class),
            ("locatedIn", [subject, container]) => {
                format!("{} is located in {}.", subject, container)
            }
            ("partOf", [part, whole]) => format!("{} is part of {}.", part, whole),
            ("subclassOf", [sub, sup]) => format!("{} is a subclass of {}.", sub, sup),
            ("containedIn", [subject, container]) => {
                format!("{} is contained in {}.", subject, container)
            }
            ("hasState", [subject, state]) => format!("{} is {}.", subject, state),
            ("hasProperty", [subject, property]) => format!("{} is {}.", subject, property),
            (op, args) if args.is_empty() => format!("{}.", op),
            (op, args) => format!("{} {}.", op, args.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_isa_as_a_copula_sentence() {
        let narrator = DefaultNarrator;
        assert_eq!(
            narrator.sentence("isA", &["Dog".into(), "Mammal".into()]),
            "Dog is a Mammal."
        );
    }

    #[test]
    fn falls_back_to_a_generic_rendering() {
        let narrator = DefaultNarrator;
        assert_eq!(
            narrator.sentence("love", &["John".into(), "Mary".into()]),
            "love John Mary."
        );
    }
}
