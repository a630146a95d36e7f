//! First-order unification between a goal statement and a quantified
//! rule's conclusion (or, inside condition proving, a leaf pattern).

use holobind_encode::{Argument, Encoder, Statement};
use std::collections::HashMap;

/// A variable-name to ground-name binding map.
///
/// Bindings are always flat strings, never nested terms, so there is
/// nothing an occurs-check would catch here — a bound variable can never
/// contain itself, unlike unification over recursive term trees.
pub type Bindings = HashMap<String, String>;

/// Attempts to unify `pattern` against `goal`, starting from `bindings`.
///
/// `pattern`'s `Hole` arguments are the pattern's variables; every other
/// argument shape is treated as a constant that must name the same atom
/// as the corresponding `goal` argument. Operator and arity must match
/// exactly. Returns the extended binding map on success, consistent with
/// whatever `bindings` already held.
pub fn unify_statement(
    goal: &Statement,
    pattern: &Statement,
    encoder: &Encoder,
    bindings: &Bindings,
) -> Option<Bindings> {
    if goal.operator != pattern.operator {
        return None;
    }
    if goal.arguments.len() != pattern.arguments.len() {
        return None;
    }

    let mut result = bindings.clone();
    for (pattern_arg, goal_arg) in pattern.arguments.iter().zip(goal.arguments.iter()) {
        let goal_name = encoder.argument_name(goal_arg);
        match pattern_arg {
            Argument::Hole(var) => {
                if let Some(existing) = result.get(var) {
                    if existing != &goal_name {
                        return None;
                    }
                } else {
                    result.insert(var.clone(), goal_name);
                }
            }
            other => {
                if encoder.argument_name(other) != goal_name {
                    return None;
                }
            }
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holobind_encode::parse_source;

    #[test]
    fn unifies_a_fully_variable_pattern() {
        let encoder = Encoder::new(64);
        let goal = parse_source("isA Rex Dog").unwrap().remove(0);
        let pattern = parse_source("isA ?x ?y").unwrap().remove(0);
        let bindings = unify_statement(&goal, &pattern, &encoder, &Bindings::new()).unwrap();
        assert_eq!(bindings.get("x"), Some(&"Rex".to_string()));
        assert_eq!(bindings.get("y"), Some(&"Dog".to_string()));
    }

    #[test]
    fn rejects_mismatched_operator() {
        let encoder = Encoder::new(64);
        let goal = parse_source("isA Rex Dog").unwrap().remove(0);
        let pattern = parse_source("partOf ?x ?y").unwrap().remove(0);
        assert!(unify_statement(&goal, &pattern, &encoder, &Bindings::new()).is_none());
    }

    #[test]
    fn rejects_inconsistent_repeated_variable() {
        let encoder = Encoder::new(64);
        let goal = parse_source("between Rex Dog").unwrap().remove(0);
        let pattern = parse_source("between ?x ?x").unwrap().remove(0);
        assert!(unify_statement(&goal, &pattern, &encoder, &Bindings::new()).is_none());
    }

    #[test]
    fn constant_slot_must_match_exactly() {
        let encoder = Encoder::new(64);
        let goal = parse_source("isA Rex Cat").unwrap().remove(0);
        let pattern = parse_source("isA ?x Dog").unwrap().remove(0);
        assert!(unify_statement(&goal, &pattern, &encoder, &Bindings::new()).is_none());
    }

    #[test]
    fn extends_preexisting_bindings_consistently() {
        let encoder = Encoder::new(64);
        let goal = parse_source("isA Rex Dog").unwrap().remove(0);
        let pattern = parse_source("isA ?x ?y").unwrap().remove(0);
        let mut seed = Bindings::new();
        seed.insert("x".to_string(), "Rex".to_string());
        let bindings = unify_statement(&goal, &pattern, &encoder, &seed).unwrap();
        assert_eq!(bindings.get("y"), Some(&"Dog".to_string()));

        let mut bad_seed = Bindings::new();
        bad_seed.insert("x".to_string(), "Fido".to_string());
        assert!(unify_statement(&goal, &pattern, &encoder, &bad_seed).is_none());
    }
}
