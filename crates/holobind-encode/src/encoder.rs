//! AST-to-vector encoding and `Implies` rule-candidate construction.

use crate::ast::{Argument, Literal, Statement};
use crate::condition::{ConditionPart, RuleCandidate};
use crate::error::{EncodeError, EncodeResult};
use crate::metadata::Metadata;
use crate::scope::Scope;
use holobind_algebra::{bind, bundle, PositionCodes};
use holobind_geometry::BitVector;
use holobind_vocab::{Vocabulary, EMPTY_LIST_NAME};
use std::collections::HashSet;

/// Turns parsed statements into vectors, structured metadata, and (for
/// `Implies` statements) rule candidates.
///
/// Holds no state of its own beyond the dimensionality every vector it
/// produces must share; the vocabulary, position-code cache, and scope it
/// operates over all belong to the caller (ultimately the session).
pub struct Encoder {
    dimensions: usize,
}

impl Encoder {
    /// Creates an encoder for vectors of `dimensions` bits.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Encodes one argument to its vector.
    pub fn encode_argument(
        &self,
        argument: &Argument,
        vocab: &mut Vocabulary,
        scope: &Scope,
        line: usize,
    ) -> EncodeResult<BitVector> {
        match argument {
            Argument::Identifier(name) => Ok(vocab.get_or_create(name)),
            Argument::Hole(name) => Ok(vocab.get_or_create(&holobind_vocab::hole_name(name))),
            Argument::Reference(name) => scope.vector(name).cloned().ok_or_else(|| {
                EncodeError::UndefinedReference {
                    line,
                    name: name.clone(),
                }
            }),
            Argument::Literal(literal) => Ok(vocab.get_or_create(&literal.canonical_form())),
            Argument::List(items) => {
                if items.is_empty() {
                    return Ok(vocab.get_or_create(EMPTY_LIST_NAME));
                }
                let encoded: Vec<BitVector> = items
                    .iter()
                    .map(|item| self.encode_argument(item, vocab, scope, line))
                    .collect::<EncodeResult<_>>()?;
                Ok(bundle(&encoded, None).expect("non-empty list yields non-empty bundle input"))
            }
        }
    }

    /// Builds a statement's structured metadata without encoding a vector.
    ///
    /// Used by callers that only need the authoritative `{operator, args}`
    /// view — e.g. the contradiction monitor resolving what a `Not $ref`
    /// statement negates — and would otherwise pay for a position-code
    /// lookup and a chain of `bind`s they never use.
    pub fn statement_metadata(&self, statement: &Statement) -> Metadata {
        let args = statement
            .arguments
            .iter()
            .map(|a| self.argument_name(a))
            .collect();
        Metadata::new(statement.operator.clone(), args)
    }

    /// The name-flattened form of an argument, for structured metadata.
    pub fn argument_name(&self, argument: &Argument) -> String {
        match argument {
            Argument::Identifier(name) => name.clone(),
            Argument::Hole(name) => holobind_vocab::hole_name(name),
            Argument::Reference(name) => format!("${}", name),
            Argument::Literal(literal) => literal.canonical_form(),
            Argument::List(items) => {
                let inner: Vec<String> = items.iter().map(|i| self.argument_name(i)).collect();
                format!("[{}]", inner.join(", "))
            }
        }
    }

    /// Encodes a whole statement: `enc(stmt) = stamp(op) xor bind(P_i, stamp(a_i))...`.
    pub fn encode_statement(
        &self,
        statement: &Statement,
        vocab: &mut Vocabulary,
        positions: &mut PositionCodes,
        scope: &Scope,
    ) -> EncodeResult<(BitVector, Metadata)> {
        let mut vector = vocab.get_or_create(&statement.operator);
        let mut args = Vec::with_capacity(statement.arguments.len());
        for (index, argument) in statement.arguments.iter().enumerate() {
            let position = positions.position(index + 1)?;
            let argument_vector =
                self.encode_argument(argument, vocab, scope, statement.line)?;
            let contribution = bind(&position, &argument_vector)?;
            vector = bind(&vector, &contribution)?;
            args.push(self.argument_name(argument));
        }
        Ok((vector, Metadata::new(statement.operator.clone(), args)))
    }

    /// If `statement` is a well-formed `Implies $cond $conc`, resolves both
    /// references against `scope` and builds the rule candidate the
    /// knowledge base should register. Returns `None` for any other
    /// statement shape (including an `Implies` whose arguments are not
    /// exactly two references — such a statement still encodes and
    /// persists normally, it just never becomes a rule).
    pub fn try_build_rule_candidate(
        &self,
        statement: &Statement,
        vocab: &mut Vocabulary,
        positions: &mut PositionCodes,
        scope: &Scope,
    ) -> EncodeResult<Option<RuleCandidate>> {
        if statement.operator != "Implies" || statement.arguments.len() != 2 {
            return Ok(None);
        }
        let (cond_name, conc_name) = match (&statement.arguments[0], &statement.arguments[1]) {
            (Argument::Reference(c), Argument::Reference(k)) => (c.clone(), k.clone()),
            _ => return Ok(None),
        };

        let condition_ast = scope
            .statement(&cond_name)
            .ok_or_else(|| EncodeError::UndefinedReference {
                line: statement.line,
                name: cond_name.clone(),
            })?
            .clone();
        let conclusion_ast = scope
            .statement(&conc_name)
            .ok_or_else(|| EncodeError::UndefinedReference {
                line: statement.line,
                name: conc_name.clone(),
            })?
            .clone();

        let condition_vector = scope.vector(&cond_name).cloned().expect("bound alongside its statement");
        let conclusion_vector = scope.vector(&conc_name).cloned().expect("bound alongside its statement");

        let mut visiting = HashSet::new();
        let condition_parts = if is_compound(&condition_ast) {
            Some(self.chase_condition(&cond_name, scope, vocab, positions, &mut visiting)?)
        } else {
            None
        };

        let condition_variables = collect_holes(&condition_ast);
        let conclusion_variables = collect_holes(&conclusion_ast);
        let has_variables = !conclusion_variables.is_empty();

        Ok(Some(RuleCandidate {
            name: statement.binding.clone(),
            source_text: reconstruct(statement),
            condition_vector,
            conclusion_vector,
            condition_ast,
            conclusion_ast,
            condition_variables,
            conclusion_variables,
            has_variables,
            condition_parts,
        }))
    }

    /// Chases `alias` through `scope`, resolving `And`/`Or`/`Not` references
    /// into a [`ConditionPart`] tree.
    fn chase_condition(
        &self,
        alias: &str,
        scope: &Scope,
        vocab: &mut Vocabulary,
        positions: &mut PositionCodes,
        visiting: &mut HashSet<String>,
    ) -> EncodeResult<ConditionPart> {
        if visiting.contains(alias) {
            return Err(EncodeError::CycleInReferences {
                name: alias.to_string(),
            });
        }
        visiting.insert(alias.to_string());

        let statement = scope
            .statement(alias)
            .ok_or_else(|| EncodeError::UndefinedReference {
                line: 0,
                name: alias.to_string(),
            })?
            .clone();

        let part = match statement.operator.as_str() {
            "And" | "Or" => {
                let mut parts = Vec::new();
                for argument in &statement.arguments {
                    match argument {
                        Argument::Reference(child) => {
                            parts.push(self.chase_condition(child, scope, vocab, positions, visiting)?)
                        }
                        other => {
                            let (vector, _) =
                                self.leaf_from_argument(other, &statement, vocab, scope)?;
                            parts.push(ConditionPart::Leaf {
                                vector,
                                ast: statement.clone(),
                            });
                        }
                    }
                }
                if statement.operator == "And" {
                    ConditionPart::And(parts)
                } else {
                    ConditionPart::Or(parts)
                }
            }
            "Not" => {
                let inner = match statement.arguments.first() {
                    Some(Argument::Reference(child)) => {
                        self.chase_condition(child, scope, vocab, positions, visiting)?
                    }
                    _ => {
                        let (vector, _) = self.encode_statement(&statement, vocab, positions, scope)?;
                        ConditionPart::Leaf {
                            vector,
                            ast: statement.clone(),
                        }
                    }
                };
                ConditionPart::Not(Box::new(inner))
            }
            _ => {
                let (vector, _) = self.encode_statement(&statement, vocab, positions, scope)?;
                ConditionPart::Leaf {
                    vector,
                    ast: statement,
                }
            }
        };

        visiting.remove(alias);
        Ok(part)
    }

    fn leaf_from_argument(
        &self,
        argument: &Argument,
        owner: &Statement,
        vocab: &mut Vocabulary,
        scope: &Scope,
    ) -> EncodeResult<(BitVector, Metadata)> {
        let vector = self.encode_argument(argument, vocab, scope, owner.line)?;
        Ok((vector, Metadata::new(owner.operator.clone(), vec![self.argument_name(argument)])))
    }
}

fn is_compound(statement: &Statement) -> bool {
    matches!(statement.operator.as_str(), "And" | "Or" | "Not")
}

/// Collects every hole name appearing anywhere in `statement`'s arguments.
fn collect_holes(statement: &Statement) -> Vec<String> {
    let mut holes = Vec::new();
    for argument in &statement.arguments {
        collect_holes_in_argument(argument, &mut holes);
    }
    holes
}

fn collect_holes_in_argument(argument: &Argument, out: &mut Vec<String>) {
    match argument {
        Argument::Hole(name) => {
            if !out.contains(name) {
                out.push(name.clone());
            }
        }
        Argument::List(items) => {
            for item in items {
                collect_holes_in_argument(item, out);
            }
        }
        _ => {}
    }
}

fn reconstruct(statement: &Statement) -> String {
    let args: Vec<String> = statement
        .arguments
        .iter()
        .map(|a| match a {
            Argument::Identifier(n) => n.clone(),
            Argument::Hole(n) => format!("?{}", n),
            Argument::Reference(n) => format!("${}", n),
            Argument::Literal(Literal::Str(s)) => format!("\"{}\"", s),
            Argument::Literal(Literal::Number(n)) => format!("{}", n),
            Argument::List(_) => "[...]".to_string(),
        })
        .collect();
    format!("{} {}", statement.operator, args.join(" "))
}
