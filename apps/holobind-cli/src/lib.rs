//! Holobind CLI
//!
//! Command-line interface over [`holobind_session::Session`].
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `holobind learn <theory>` | Learn a theory file, report facts/warnings/errors |
//! | `holobind query <theory> <stmt>` | Learn, then resolve a hole-bearing query |
//! | `holobind prove <theory> <goal>` | Learn, then attempt a backward-chaining proof |
//! | `holobind stats <theory>` | Learn, then report fact/rule counts and contents |
//! | `holobind repl [theory]` | Interactive session over stdin/stdout |
//!
//! This binary is a manual-use tool, not a suite-loading test harness —
//! that responsibility is explicitly out of scope for the core engine.

mod cli;

pub use cli::run_cli;
