//! Reserved and synthetic atom names.
//!
//! These all go through the same `getOrCreate` path as a user-written
//! identifier — there is nothing structurally special about them, only a
//! naming convention the rest of the workspace agrees to respect.

/// Operator names the surface grammar treats specially.
pub const RESERVED_OPERATORS: &[&str] = &["Implies", "And", "Or", "Not", "ForAll", "Exists"];

/// The synthetic name for query hole `?h`.
pub fn hole_name(h: &str) -> String {
    format!("__HOLE_{}__", h)
}

/// The synthetic name for position index `i`.
pub fn position_name(i: usize) -> String {
    format!("__POS_{}__", i)
}

/// The synthetic name standing in for the empty list literal.
pub const EMPTY_LIST_NAME: &str = "__EMPTY_LIST__";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_name_is_namespaced() {
        assert_eq!(hole_name("x"), "__HOLE_x__");
    }

    #[test]
    fn position_name_is_namespaced() {
        assert_eq!(position_name(3), "__POS_3__");
    }

    #[test]
    fn reserved_operators_cover_connectives() {
        assert!(RESERVED_OPERATORS.contains(&"Implies"));
        assert!(RESERVED_OPERATORS.contains(&"Not"));
    }
}
