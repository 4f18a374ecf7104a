//! Backtracking runtime for generated PEG parsers.
//!
//! A grammar compiler turns every rule into a Rust function taking
//! `&mut ParserContext` and returning a [`MatchResult`]. Those functions
//! call into this crate for everything stateful:
//!
//! - **Checkpoints**: [`ParserContext::enter`], [`commit`](ParserContext::commit),
//!   [`abandon`](ParserContext::abandon), and the combinators built on them
//!   ([`attempt`](ParserContext::attempt), [`optional`](ParserContext::optional),
//!   [`many`](ParserContext::many), [`one_of!`], lookaheads).
//! - **Terminals**: [`ParserContext::match_terminal`] with a per-context
//!   compiled-pattern cache, and [`ParserContext::match_literal`].
//! - **Bindings**: [`ParserContext::get`] / [`ParserContext::set`] for
//!   semantic actions, scoped to checkpoints.
//! - **Errors**: the furthest recorded failure becomes the single
//!   [`ParseError`] when every alternative is exhausted.
//!
//! ```text
//! fn digits<'a>(ctx: &mut ParserContext<'a>) -> MatchResult<Vec<&'a str>> {
//!     ctx.many1(|ctx| ctx.match_terminal("[0-9]"))
//! }
//!
//! let parsed = speg_runtime::parse("123", digits)?;   // Ok(["1", "2", "3"])
//! let failed = speg_runtime::parse("12a", digits);    // offset 2, column 3
//! ```
//!
//! Everything is single-threaded and synchronous. A context owns all of its
//! state, so independent parses on separate threads need no locking.

mod combinators;
mod config;
mod context;
mod error;
mod frame;
mod position;
mod scope;
mod signal;
mod terminal;
mod tracker;

#[cfg(test)]
mod tests;

pub use config::RuntimeConfig;
pub use context::{parse, ParserContext};
pub use error::{ParseError, PatternError, RuntimeError};
pub use frame::{Binding, Frame};
pub use position::Position;
pub use signal::{Expectation, Failure, MatchResult, Signal};
pub use terminal::PatternCache;
pub use tracker::{ErrorTracker, FailureRecord};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for runtime diagnostics.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=speg_runtime=trace`
/// to see every enter/commit/abandon. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host program.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
