//! The single-threaded façade: owns every mutable piece of state and
//! coordinates `learn` / `query` / `prove` / `decode` / `summarize` /
//! `elaborate` / `getReasoningStats` over them.

use crate::decode::{decode, DecodeOutcome};
use crate::error::SessionResult;
use crate::learn::LearnOutcome;
use crate::loader::FilesystemLoader;
use crate::narrate::{DefaultNarrator, NarrativeGenerator};
use crate::stats::{ReasoningStats, StatsSnapshot};
use holobind_algebra::PositionCodes;
use holobind_encode::{parse_source, Argument, Encoder, Literal, Scope, Statement, TheoryLoader};
use holobind_geometry::BitVector;
use holobind_kb::KnowledgeBase;
use holobind_proof::{prove, ProofOutcome, ProveOptions};
use holobind_query::{QueryEngine, QueryOutcome};
use holobind_vocab::Vocabulary;
use std::collections::HashSet;
use std::path::Path;

/// The default vector dimensionality.
pub const DEFAULT_DIMENSIONS: usize = 2048;

/// Owns the vocabulary, scope, knowledge base, and statistics for one
/// reasoning session. Not `Sync`/shareable across threads: every operation
/// on a `Session` must be serialized by its caller.
pub struct Session {
    dimensions: usize,
    vocab: Vocabulary,
    positions: PositionCodes,
    scope: Scope,
    kb: KnowledgeBase,
    encoder: Encoder,
    query_engine: QueryEngine,
    operators: HashSet<String>,
    loader: Box<dyn TheoryLoader>,
    loaded_paths: HashSet<String>,
    narrator: Box<dyn NarrativeGenerator>,
    stats: ReasoningStats,
}

impl Session {
    /// A session of `dimensions` bits, loading theories relative to the
    /// current working directory.
    pub fn new(dimensions: usize) -> SessionResult<Self> {
        Self::with_loader(dimensions, Box::new(FilesystemLoader::default()))
    }

    /// A session of `dimensions` bits, loading theories relative to `base_dir`.
    pub fn with_base_dir(dimensions: usize, base_dir: impl AsRef<Path>) -> SessionResult<Self> {
        Self::with_loader(
            dimensions,
            Box::new(FilesystemLoader::new(base_dir.as_ref().to_path_buf())),
        )
    }

    /// A session with a caller-supplied theory loader (tests typically
    /// pass [`holobind_encode::InMemoryLoader`]).
    pub fn with_loader(dimensions: usize, loader: Box<dyn TheoryLoader>) -> SessionResult<Self> {
        Ok(Self {
            dimensions,
            vocab: Vocabulary::new(dimensions)?,
            positions: PositionCodes::new(dimensions),
            scope: Scope::new(),
            kb: KnowledgeBase::new(dimensions),
            encoder: Encoder::new(dimensions),
            query_engine: QueryEngine::new(dimensions),
            operators: HashSet::new(),
            loader,
            loaded_paths: HashSet::new(),
            narrator: Box::new(DefaultNarrator),
            stats: ReasoningStats::new(),
        })
    }

    /// Swaps in a different narrative generator — `elaborate`'s exact
    /// phrasing is a free design left to the embedder.
    pub fn set_narrator(&mut self, narrator: Box<dyn NarrativeGenerator>) {
        self.narrator = narrator;
    }

    /// This session's fixed vector dimensionality.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Forgets every `@alias` binding. Non-persistent by design: scope is
    /// forgotten when the session ends or the caller chooses. Does not
    /// touch the knowledge base or vocabulary.
    pub fn clear_scope(&mut self) {
        self.scope = Scope::new();
    }

    /// The number of persisted facts.
    pub fn fact_count(&self) -> usize {
        self.kb.len()
    }

    /// The number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.kb.rules().len()
    }

    /// Parses and persists `text`, one statement per non-blank,
    /// non-comment line.
    pub fn learn(&mut self, text: &str) -> LearnOutcome {
        let mut outcome = LearnOutcome::default();
        self.learn_into(text, &mut outcome);
        outcome.success = outcome.errors.is_empty();
        outcome
    }

    fn learn_into(&mut self, text: &str, outcome: &mut LearnOutcome) {
        let statements = match parse_source(text) {
            Ok(statements) => statements,
            Err(e) => {
                outcome.errors.push(e.to_string());
                return;
            }
        };

        for statement in statements {
            if let Err(e) = self.learn_statement(&statement, outcome) {
                outcome.errors.push(e);
                // UndefinedReference (and similar encode-time errors) let
                // the rest of the batch continue; only a ParseError —
                // already handled above — halts it outright.
                continue;
            }
        }
    }

    fn learn_statement(&mut self, statement: &Statement, outcome: &mut LearnOutcome) -> Result<(), String> {
        match statement.operator.as_str() {
            "Load" => {
                self.learn_load(statement, outcome)?;
                return Ok(());
            }
            "Unload" => {
                self.learn_unload(statement)?;
                return Ok(());
            }
            _ => {}
        }

        self.operators.insert(statement.operator.clone());

        let (vector, metadata) = self
            .encoder
            .encode_statement(statement, &mut self.vocab, &mut self.positions, &self.scope)
            .map_err(|e| e.to_string())?;

        // Rule registration happens regardless of whether the `Implies`
        // statement itself persists — an `@r Implies $cond $conc` binding
        // with no `:id` never becomes a KB fact, only a rule.
        if let Some(candidate) = self
            .encoder
            .try_build_rule_candidate(statement, &mut self.vocab, &mut self.positions, &self.scope)
            .map_err(|e| e.to_string())?
        {
            self.kb.register_rule(candidate.into());
        }

        let should_persist = statement.persist_name.is_some() || statement.binding.is_none();
        if should_persist {
            let negated_signature = self.resolve_negation_signature(statement);
            let warnings = self
                .kb
                .insert_fact(
                    vector.clone(),
                    metadata,
                    statement.persist_name.clone(),
                    negated_signature.as_deref(),
                )
                .map_err(|e| e.to_string())?;
            outcome.facts += 1;
            outcome
                .warnings
                .extend(warnings.iter().map(|w| format!("Warning: {}", w.message())));
        }

        if let Some(alias) = &statement.binding {
            self.scope.bind(alias, vector, statement.clone());
        }

        Ok(())
    }

    /// `Not $ref` negates whatever `$ref` was bound to; resolves that
    /// statement's metadata signature so the contradiction monitor can ask
    /// "is that fact already in the KB?" without itself knowing about scopes.
    fn resolve_negation_signature(&self, statement: &Statement) -> Option<String> {
        if statement.operator != "Not" || statement.arguments.len() != 1 {
            return None;
        }
        match &statement.arguments[0] {
            Argument::Reference(alias) => self
                .scope
                .statement(alias)
                .map(|negated| self.encoder.statement_metadata(negated).signature()),
            _ => None,
        }
    }

    fn learn_load(&mut self, statement: &Statement, outcome: &mut LearnOutcome) -> Result<(), String> {
        let path = Self::single_string_argument(statement, "Load")?;
        if self.loaded_paths.contains(&path) {
            return Ok(());
        }
        // Marked loaded before recursing so a theory that (directly or
        // transitively) re-loads itself terminates instead of looping.
        self.loaded_paths.insert(path.clone());
        let text = self
            .loader
            .read(&path)
            .map_err(|e| format!("failed to load theory \"{}\": {}", path, e))?;
        let mut nested = LearnOutcome::default();
        self.learn_into(&text, &mut nested);
        outcome.merge(nested);
        Ok(())
    }

    fn learn_unload(&mut self, statement: &Statement) -> Result<(), String> {
        let path = Self::single_string_argument(statement, "Unload")?;
        // Makes the path eligible for reload; never retracts the facts or
        // rules that loading it already produced.
        self.loaded_paths.remove(&path);
        Ok(())
    }

    fn single_string_argument(statement: &Statement, directive: &str) -> Result<String, String> {
        match statement.arguments.as_slice() {
            [Argument::Literal(Literal::Str(path))] => Ok(path.clone()),
            _ => Err(format!(
                "{} expects exactly one string-literal path argument",
                directive
            )),
        }
    }

    /// Resolves `text` (a single statement, possibly with holes) against
    /// the knowledge base.
    pub fn query(&mut self, text: &str) -> QueryOutcome {
        let statement = match Self::parse_single(text) {
            Ok(s) => s,
            Err(e) => return QueryOutcome::failure(e),
        };
        let outcome = self.query_engine.query(
            &statement,
            &mut self.vocab,
            &mut self.positions,
            &self.scope,
            &self.kb,
        );
        self.stats.record_query(&outcome, self.kb.len());
        outcome
    }

    /// Attempts to prove `text` (a fully-ground goal) against the
    /// knowledge base and rule set, within `options` (or the defaults).
    pub fn prove(&mut self, text: &str, options: Option<ProveOptions>) -> ProofOutcome {
        let statement = match Self::parse_single(text) {
            Ok(s) => s,
            Err(e) => return ProofOutcome::failure(e),
        };
        let options = options.unwrap_or_default();
        let outcome = prove(&statement, &mut self.vocab, &mut self.positions, &self.kb, &options);
        self.stats.record_proof(&outcome, self.kb.len());
        outcome
    }

    fn parse_single(text: &str) -> Result<Statement, String> {
        let mut statements = parse_source(text).map_err(|e| e.to_string())?;
        if statements.is_empty() {
            return Err("expected exactly one statement".to_string());
        }
        Ok(statements.remove(0))
    }

    /// Decodes `vector` to its best-matching `(operator, args)` guess.
    pub fn decode(&mut self, vector: &BitVector) -> DecodeOutcome {
        decode(vector, &mut self.vocab, &mut self.positions, &self.operators)
    }

    /// Decodes `vector`, then hands the result to the narrative generator.
    pub fn summarize(&mut self, vector: &BitVector) -> String {
        let decoded = self.decode(vector);
        match decoded.operator {
            Some(operator) => {
                let args: Vec<String> = decoded
                    .arguments
                    .into_iter()
                    .map(|a| a.name.unwrap_or_else(|| "?".to_string()))
                    .collect();
                self.narrator.sentence(&operator, &args)
            }
            None => "(nothing recognizable decoded)".to_string(),
        }
    }

    /// Walks a proof's step log, rendering each step's fact through the
    /// narrative generator and joining the result.
    pub fn elaborate(&self, proof: &ProofOutcome) -> String {
        let mut sentences = Vec::new();
        for step in &proof.steps {
            if let Some(fact) = &step.fact {
                let mut parts = fact.split_whitespace();
                if let Some(operator) = parts.next() {
                    let args: Vec<String> = parts.map(|s| s.to_string()).collect();
                    sentences.push(self.narrator.sentence(operator, &args));
                }
            }
        }
        if sentences.is_empty() {
            match &proof.reason {
                Some(reason) => reason.clone(),
                None => "(no steps to elaborate)".to_string(),
            }
        } else {
            sentences.join(" ")
        }
    }

    /// A snapshot of the running reasoning counters. Zeroes the counters
    /// afterward when `reset` is `true`.
    pub fn reasoning_stats(&mut self, reset: bool) -> StatsSnapshot {
        let snapshot = self.stats.snapshot();
        if reset {
            self.stats.reset();
        }
        snapshot
    }

    /// A debug rendering of every persisted fact and registered rule, in
    /// learn order. A development convenience the CLI's `dump` subcommand
    /// uses, not part of the core reasoning contract.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for fact in self.kb.facts() {
            out.push_str(&fact.metadata.signature());
            if let Some(name) = &fact.name {
                out.push_str(&format!("  (@{})", name));
            }
            out.push('\n');
        }
        for rule in self.kb.rules() {
            out.push_str(&format!("Implies({})\n", rule.source_text));
        }
        out
    }

    /// A no-op in this in-memory implementation — there is no persisted
    /// state in the core to flush or release. Kept so callers modeling a
    /// resource-owning session don't need a special case for this one.
    pub fn close(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use holobind_encode::InMemoryLoader;

    fn session() -> Session {
        Session::with_loader(1024, Box::new(InMemoryLoader::new())).unwrap()
    }

    #[test]
    fn learn_persists_anonymous_facts() {
        let mut session = session();
        let outcome = session.learn("isA Rex Dog");
        assert!(outcome.success);
        assert_eq!(outcome.facts, 1);
        assert_eq!(session.fact_count(), 1);
    }

    #[test]
    fn binding_only_statement_is_not_persisted() {
        let mut session = session();
        let outcome = session.learn("@x isA Rex Dog");
        assert!(outcome.success);
        assert_eq!(outcome.facts, 0);
        assert_eq!(session.fact_count(), 0);
    }

    #[test]
    fn persist_name_statement_is_both_bound_and_persisted() {
        let mut session = session();
        let outcome = session.learn("@x:rex isA Rex Dog");
        assert!(outcome.success);
        assert_eq!(outcome.facts, 1);
        assert!(session.query("@q isA Rex ?who").success);
    }

    #[test]
    fn undefined_reference_is_reported_but_does_not_halt_the_batch() {
        let mut session = session();
        let outcome = session.learn("isA $missing Dog\nisA Rex Dog");
        assert!(!outcome.success);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.facts, 1);
    }

    #[test]
    fn contradiction_warning_is_non_fatal() {
        let mut session = session();
        let outcome = session.learn("hasState Box Closed\nhasState Box Open");
        assert!(outcome.success);
        assert_eq!(outcome.facts, 2);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Box is both Open and Closed"));
    }

    #[test]
    fn query_resolves_a_single_hole() {
        let mut session = session();
        session.learn("love John Mary");
        let outcome = session.query("@q love John ?who");
        assert!(outcome.success);
        let binding = outcome.bindings.get("who").unwrap();
        assert_eq!(binding.answer.as_deref(), Some("Mary"));
    }

    #[test]
    fn prove_chains_transitively() {
        let mut session = session();
        session.learn("isA Rex Dog\nisA Dog Mammal\nisA Mammal Animal");
        let outcome = session.prove("isA Rex Animal", None);
        assert!(outcome.valid);
        assert_eq!(outcome.method.as_deref(), Some("transitive_chain"));
    }

    #[test]
    fn load_is_idempotent() {
        let mut session = Session::with_loader(
            1024,
            Box::new(InMemoryLoader::new().with_theory("animals.hb", "isA Rex Dog\n")),
        )
        .unwrap();
        let first = session.learn("Load \"animals.hb\"");
        assert_eq!(first.facts, 1);
        let second = session.learn("Load \"animals.hb\"");
        assert_eq!(second.facts, 0);
        assert_eq!(session.fact_count(), 1);
    }

    #[test]
    fn unload_allows_a_subsequent_reload() {
        let mut session = Session::with_loader(
            1024,
            Box::new(InMemoryLoader::new().with_theory("animals.hb", "isA Rex Dog\n")),
        )
        .unwrap();
        session.learn("Load \"animals.hb\"");
        session.learn("Unload \"animals.hb\"");
        let reload = session.learn("Load \"animals.hb\"");
        assert_eq!(reload.facts, 1);
        assert_eq!(session.fact_count(), 2);
    }

    #[test]
    fn decode_and_summarize_round_trip_a_learned_fact() {
        let mut session = session();
        session.learn("isA Rex Dog");
        let goal = Statement {
            binding: None,
            persist_name: None,
            operator: "isA".to_string(),
            arguments: vec![
                Argument::Identifier("Rex".to_string()),
                Argument::Identifier("Dog".to_string()),
            ],
            line: 1,
        };
        let (vector, _) = session
            .encoder
            .encode_statement(&goal, &mut session.vocab, &mut session.positions, &session.scope)
            .unwrap();
        let summary = session.summarize(&vector);
        assert_eq!(summary, "Rex is a Dog.");
    }

    #[test]
    fn reasoning_stats_track_proof_calls() {
        let mut session = session();
        session.learn("isA Rex Dog");
        session.prove("isA Rex Dog", None);
        let snapshot = session.reasoning_stats(false);
        assert_eq!(snapshot.proofs, 1);
        assert_eq!(snapshot.successful_proofs, 1);
        let reset_snapshot = session.reasoning_stats(true);
        assert_eq!(reset_snapshot.proofs, 1);
        assert_eq!(session.reasoning_stats(false).proofs, 0);
    }
}
