//! Command-line argument parsing and dispatch for the `holobind` binary.
//!
//! The CLI is a thin, manual-use wrapper over [`holobind_session::Session`]:
//! it reads one or more theory files from disk, learns them into a fresh
//! session, and then runs exactly one of `query`/`prove`/`stats`, or drops
//! into an interactive `repl`. It is deliberately not a suite-loading test
//! harness — that responsibility belongs to whatever test runner an
//! embedder wires up separately.

use clap::{Parser, Subcommand};
use holobind_session::{Session, DEFAULT_DIMENSIONS};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// The `holobind` command-line tool.
#[derive(Parser)]
#[command(name = "holobind")]
#[command(about = "Learn, query, and prove facts over a binary-HDC knowledge base", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Vector dimensionality for the session (must be a positive multiple of 32).
    #[arg(long, global = true, default_value_t = DEFAULT_DIMENSIONS)]
    pub dimensions: usize,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Learns a theory file and reports facts persisted, warnings, and errors.
    Learn {
        /// Path to the theory file (surface DSL, one statement per line).
        theory: PathBuf,
    },
    /// Learns a theory file, then resolves a single (possibly hole-bearing) query.
    Query {
        /// Path to the theory file to learn first.
        theory: PathBuf,
        /// The query statement, e.g. `love John ?who`.
        statement: String,
    },
    /// Learns a theory file, then attempts to prove a fully-ground goal.
    Prove {
        /// Path to the theory file to learn first.
        theory: PathBuf,
        /// The goal statement, e.g. `isA Rex Animal`.
        goal: String,
        /// Wall-clock budget for the proof search, in milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Learns a theory file, then reports its fact/rule counts and contents.
    Stats {
        /// Path to the theory file to learn first.
        theory: PathBuf,
    },
    /// Starts an interactive session over stdin/stdout.
    ///
    /// Optionally pre-loads a theory file. Lines starting with `?` run a
    /// query, `prove <goal>` attempts a proof, `:stats` prints reasoning
    /// stats, `:quit` exits; anything else is learned as a statement.
    Repl {
        /// An optional theory file to learn before the prompt starts.
        theory: Option<PathBuf>,
    },
}

/// Parses `std::env::args()` and dispatches to the matching handler.
pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let mut session = Session::new(cli.dimensions).map_err(|e| e.to_string())?;

    match cli.command {
        Commands::Learn { theory } => learn_command(&mut session, &theory),
        Commands::Query { theory, statement } => {
            learn_command(&mut session, &theory)?;
            query_command(&mut session, &statement);
            Ok(())
        }
        Commands::Prove {
            theory,
            goal,
            timeout_ms,
        } => {
            learn_command(&mut session, &theory)?;
            prove_command(&mut session, &goal, timeout_ms);
            Ok(())
        }
        Commands::Stats { theory } => {
            learn_command(&mut session, &theory)?;
            stats_command(&mut session);
            Ok(())
        }
        Commands::Repl { theory } => {
            if let Some(path) = theory {
                learn_command(&mut session, &path)?;
            }
            repl(&mut session)
        }
    }
}

fn read_theory(path: &PathBuf) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("could not read {}: {}", path.display(), e))
}

fn learn_command(session: &mut Session, theory: &PathBuf) -> Result<(), String> {
    let text = read_theory(theory)?;
    let outcome = session.learn(&text);
    println!("learned {} fact(s)", outcome.facts);
    for warning in &outcome.warnings {
        println!("{}", warning);
    }
    if !outcome.success {
        for error in &outcome.errors {
            eprintln!("error: {}", error);
        }
        return Err(format!("{} statement(s) failed to learn", outcome.errors.len()));
    }
    Ok(())
}

fn query_command(session: &mut Session, statement: &str) {
    let outcome = session.query(statement);
    if !outcome.success {
        println!("no match: {}", outcome.reason.as_deref().unwrap_or("unknown"));
        return;
    }
    for (hole, binding) in &outcome.bindings {
        println!(
            "{} = {} (similarity {:.3})",
            hole,
            binding.answer.as_deref().unwrap_or("?"),
            binding.similarity
        );
    }
    println!("confidence {:.3}{}", outcome.confidence, if outcome.ambiguous { " (ambiguous)" } else { "" });
}

fn prove_command(session: &mut Session, goal: &str, timeout_ms: Option<u64>) {
    let options = timeout_ms.map(|ms| holobind_session::ProveOptions::with_timeout(Duration::from_millis(ms)));
    let outcome = session.prove(goal, options);
    if !outcome.valid {
        println!("not proved: {}", outcome.reason.as_deref().unwrap_or("unknown"));
        return;
    }
    match outcome.result {
        Some(false) => println!("refuted via {}", outcome.method.as_deref().unwrap_or("?")),
        _ => println!("proved via {}", outcome.method.as_deref().unwrap_or("?")),
    }
    println!("{}", session.elaborate(&outcome));
}

fn stats_command(session: &mut Session) {
    println!("{} fact(s), {} rule(s)", session.fact_count(), session.rule_count());
    print!("{}", session.dump());
    let snapshot = session.reasoning_stats(false);
    println!(
        "queries={} proofs={} successful_proofs={} avg_proof_length={:.2}",
        snapshot.queries, snapshot.proofs, snapshot.successful_proofs, snapshot.avg_proof_length
    );
}

fn repl(session: &mut Session) -> Result<(), String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("holobind> ");
        stdout.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == ":quit" || line == ":exit" {
            break;
        } else if line == ":stats" {
            stats_command(session);
        } else if let Some(query) = line.strip_prefix('?') {
            query_command(session, query.trim());
        } else if let Some(goal) = line.strip_prefix("prove ") {
            prove_command(session, goal.trim(), None);
        } else {
            let outcome = session.learn(line);
            for warning in &outcome.warnings {
                println!("{}", warning);
            }
            for error in &outcome.errors {
                eprintln!("error: {}", error);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prove_with_timeout() {
        let cli = Cli::try_parse_from([
            "holobind",
            "prove",
            "theory.hb",
            "isA Rex Animal",
            "--timeout-ms",
            "500",
        ])
        .unwrap();
        match cli.command {
            Commands::Prove { goal, timeout_ms, .. } => {
                assert_eq!(goal, "isA Rex Animal");
                assert_eq!(timeout_ms, Some(500));
            }
            _ => panic!("expected Prove"),
        }
    }

    #[test]
    fn dimensions_defaults_to_the_standard_vector_width() {
        let cli = Cli::try_parse_from(["holobind", "stats", "theory.hb"]).unwrap();
        assert_eq!(cli.dimensions, DEFAULT_DIMENSIONS);
    }

    #[test]
    fn learn_command_reports_a_missing_file() {
        let mut session = Session::new(64).unwrap();
        let result = learn_command(&mut session, &PathBuf::from("/nonexistent/theory.hb"));
        assert!(result.is_err());
    }
}
