//! Stack growth for deeply nested rule calls.
//!
//! A generated PEG parser calls one Rust function per grammar rule, and every
//! transactional scope (`attempt`, `optional`, `many`, lookahead) adds another
//! frame on top of that. Input such as `((((...))))` with tens of thousands of
//! levels would exhaust the native stack long before the frame stack of the
//! parse context grows large. The runtime therefore runs every scoped body
//! through [`ensure_sufficient_stack`].
//!
//! - **Native targets**: `stacker` allocates a fresh segment when the
//!   remaining stack drops below [`RED_ZONE`].
//! - **wasm32**: passthrough; the host engine owns the stack.

/// Remaining stack below which a new segment is allocated (128KB).
///
/// Sized to fit one full scoped call: frame push, regex search, and the
/// failure bookkeeping that follows a mismatch.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
///
/// ```text
/// fn parens(ctx: &mut ParserContext<'_>) -> MatchResult<usize> {
///     ensure_sufficient_stack(|| {
///         ctx.match_literal("(")?;
///         let depth = ctx.optional(parens)?.unwrap_or(0);
///         ctx.match_literal(")")?;
///         Ok(depth + 1)
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm32: call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
