//! The Contradiction Monitor: consulted before every fact is appended,
//! never blocks the append.
//!
//! Three fixed checks, run against the new fact's metadata and the facts
//! already in the knowledge base: a direct negation, an inverted temporal
//! pair, and a declared mutually-exclusive-value pair. All three are
//! warnings, attached to the learn result — the engine is paraconsistent
//! by design, so a contradiction never blocks insertion.

use crate::fact::Fact;
use holobind_encode::Metadata;

/// `hasState` values that cannot simultaneously hold of the same subject.
const HAS_STATE_PAIRS: &[(&str, &str)] = &[
    ("Open", "Closed"),
    ("Alive", "Dead"),
    ("On", "Off"),
    ("Full", "Empty"),
];

/// `hasProperty` values that cannot simultaneously hold of the same subject.
const HAS_PROPERTY_PAIRS: &[(&str, &str)] = &[("Hot", "Cold"), ("Wet", "Dry")];

fn exclusion_pairs(operator: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match operator {
        "hasState" => Some(HAS_STATE_PAIRS),
        "hasProperty" => Some(HAS_PROPERTY_PAIRS),
        _ => None,
    }
}

/// One contradiction the monitor found against the existing knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub enum Contradiction {
    /// `Not $ref` was learned while the fact `$ref` referred to is present.
    Direct {
        /// The reconstructed signature of the negated fact.
        negated: String,
    },
    /// `before`/`after` (or vice versa) already holds over the same args.
    Temporal {
        /// The operator of the newly learned fact.
        operator: String,
        /// The shared argument list.
        args: Vec<String>,
    },
    /// A declared mutually-exclusive value pair both hold of one subject.
    MutuallyExclusive {
        /// The shared subject.
        subject: String,
        /// The value the new fact asserts.
        new_value: String,
        /// The value an existing fact already asserts.
        existing_value: String,
    },
}

impl Contradiction {
    /// The warning text (callers typically prefix this with `"Warning: "`).
    pub fn message(&self) -> String {
        match self {
            Contradiction::Direct { negated } => {
                format!("direct contradiction detected: {}", negated)
            }
            Contradiction::Temporal { operator, args } => {
                format!(
                    "temporal contradiction: {} {}",
                    operator,
                    args.join(" ")
                )
            }
            Contradiction::MutuallyExclusive {
                subject,
                new_value,
                existing_value,
            } => {
                format!(
                    "contradiction - {} is both {} and {}",
                    subject, new_value, existing_value
                )
            }
        }
    }
}

fn opposite_temporal_operator(operator: &str) -> Option<&'static str> {
    match operator {
        "before" => Some("after"),
        "after" => Some("before"),
        _ => None,
    }
}

/// Checks `new_metadata` against every fact already in the knowledge base.
///
/// `negated_signature`, when `Some`, is the metadata signature (see
/// [`Metadata::signature`]) of the statement a `Not $ref` statement
/// refers to — resolved by the caller (the encoder only sees `$ref` as an
/// opaque scope alias, not the statement it names), so the direct check
/// can ask "is that signature already a fact?" without this crate needing
/// to know anything about scopes or references.
pub fn check_contradictions(
    existing: &[Fact],
    new_metadata: &Metadata,
    negated_signature: Option<&str>,
) -> Vec<Contradiction> {
    let mut found = Vec::new();

    if new_metadata.operator == "Not" {
        if let Some(signature) = negated_signature {
            if existing.iter().any(|f| f.metadata.signature() == signature) {
                found.push(Contradiction::Direct {
                    negated: signature.to_string(),
                });
            }
        }
    }

    if let Some(opposite) = opposite_temporal_operator(&new_metadata.operator) {
        if existing
            .iter()
            .any(|f| f.metadata.operator == opposite && f.metadata.args == new_metadata.args)
        {
            found.push(Contradiction::Temporal {
                operator: new_metadata.operator.clone(),
                args: new_metadata.args.clone(),
            });
        }
    }

    if let Some(pairs) = exclusion_pairs(&new_metadata.operator) {
        if new_metadata.args.len() == 2 {
            let subject = &new_metadata.args[0];
            let new_value = &new_metadata.args[1];
            for fact in existing {
                if fact.metadata.operator != new_metadata.operator || fact.metadata.args.len() != 2
                {
                    continue;
                }
                if &fact.metadata.args[0] != subject {
                    continue;
                }
                let existing_value = &fact.metadata.args[1];
                if existing_value == new_value {
                    continue;
                }
                let is_pair = pairs.iter().any(|(a, b)| {
                    (a == new_value && b == existing_value) || (b == new_value && a == existing_value)
                });
                if is_pair {
                    found.push(Contradiction::MutuallyExclusive {
                        subject: subject.clone(),
                        new_value: new_value.clone(),
                        existing_value: existing_value.clone(),
                    });
                }
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(operator: &str, args: &[&str]) -> Fact {
        Fact::new(
            holobind_geometry::BitVector::zero(32).unwrap(),
            Metadata::new(operator, args.iter().map(|a| a.to_string()).collect()),
            None,
        )
    }

    #[test]
    fn detects_mutually_exclusive_state() {
        let existing = vec![fact("hasState", &["Box", "Closed"])];
        let new_metadata = Metadata::new("hasState", vec!["Box".into(), "Open".into()]);
        let found = check_contradictions(&existing, &new_metadata, None);
        assert_eq!(
            found,
            vec![Contradiction::MutuallyExclusive {
                subject: "Box".into(),
                new_value: "Open".into(),
                existing_value: "Closed".into(),
            }]
        );
        assert_eq!(
            found[0].message(),
            "contradiction - Box is both Open and Closed"
        );
    }

    #[test]
    fn no_contradiction_for_unrelated_values() {
        let existing = vec![fact("hasState", &["Box", "Closed"])];
        let new_metadata = Metadata::new("hasState", vec!["Jar".into(), "Open".into()]);
        assert!(check_contradictions(&existing, &new_metadata, None).is_empty());
    }

    #[test]
    fn no_contradiction_for_same_value_repeated() {
        let existing = vec![fact("hasState", &["Box", "Closed"])];
        let new_metadata = Metadata::new("hasState", vec!["Box".into(), "Closed".into()]);
        assert!(check_contradictions(&existing, &new_metadata, None).is_empty());
    }

    #[test]
    fn detects_temporal_inversion() {
        let existing = vec![fact("before", &["A", "B"])];
        let new_metadata = Metadata::new("after", vec!["A".into(), "B".into()]);
        let found = check_contradictions(&existing, &new_metadata, None);
        assert_eq!(
            found,
            vec![Contradiction::Temporal {
                operator: "after".into(),
                args: vec!["A".into(), "B".into()],
            }]
        );
    }

    #[test]
    fn detects_direct_negation() {
        let existing = vec![fact("isA", &["Rex", "Dog"])];
        let new_metadata = Metadata::new("Not", vec!["$ref".into()]);
        let found = check_contradictions(&existing, &new_metadata, Some("isA Rex Dog"));
        assert_eq!(
            found,
            vec![Contradiction::Direct {
                negated: "isA Rex Dog".into(),
            }]
        );
    }

    #[test]
    fn direct_negation_absent_when_signature_not_in_kb() {
        let existing = vec![fact("isA", &["Rex", "Dog"])];
        let new_metadata = Metadata::new("Not", vec!["$ref".into()]);
        let found = check_contradictions(&existing, &new_metadata, Some("isA Fido Cat"));
        assert!(found.is_empty());
    }

    #[test]
    fn hasproperty_pairs_checked_independently_of_hasstate() {
        let existing = vec![fact("hasProperty", &["Tea", "Hot"])];
        let new_metadata = Metadata::new("hasProperty", vec!["Tea".into(), "Cold".into()]);
        assert_eq!(check_contradictions(&existing, &new_metadata, None).len(), 1);
    }
}
