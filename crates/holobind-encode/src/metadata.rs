//! The structured, authoritative view of an encoded statement.

/// `{operator, args}` extracted by name-flattening a statement's AST.
///
/// This is what the prover uses for exact lookup; the statement's vector
/// is only the approximate view used for similarity search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// The statement's operator name.
    pub operator: String,
    /// The name-flattened form of each argument, in declared order.
    pub args: Vec<String>,
}

impl Metadata {
    /// Builds metadata for an operator with no arguments.
    pub fn new(operator: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            operator: operator.into(),
            args,
        }
    }

    /// The arity (argument count).
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// A flat textual form (`"operator arg1 arg2"`), used by the
    /// contradiction monitor and the prover to name a fact in a step or
    /// warning without re-deriving it from the original source line.
    pub fn signature(&self) -> String {
        if self.args.is_empty() {
            self.operator.clone()
        } else {
            format!("{} {}", self.operator, self.args.join(" "))
        }
    }
}
