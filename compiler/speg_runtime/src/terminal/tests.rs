#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use super::*;
use crate::Position;
use pretty_assertions::assert_eq;

#[test]
fn test_cache_compiles_once_per_expression() {
    let mut cache = PatternCache::new();
    assert!(cache.is_empty());
    cache.get_or_compile("[0-9]+").unwrap();
    cache.get_or_compile("[0-9]+").unwrap();
    cache.get_or_compile("[a-z]").unwrap();
    assert_eq!(cache.len(), 2);
    assert!(cache.contains("[0-9]+"));
    assert!(!cache.contains("[0-9]"));
}

#[test]
fn test_cache_rejects_invalid_expression() {
    let mut cache = PatternCache::new();
    let error = cache.get_or_compile("(unclosed").unwrap_err();
    assert_eq!(error.expression, "(unclosed");
    assert!(cache.is_empty());
}

#[test]
fn test_cache_rejects_unbalanced_group() {
    let mut cache = PatternCache::new();
    assert!(cache.get_or_compile("a)|(b").is_err());
}

#[test]
fn test_match_terminal_is_anchored() {
    let mut ctx = ParserContext::new("ab");
    assert!(ctx.match_terminal("b").is_err());
    assert!(ctx.match_terminal("x|b").is_err());
    assert_eq!(ctx.offset(), 0);
}

#[test]
fn test_word_boundary_sees_preceding_text() {
    let mut ctx = ParserContext::new("xfoo foo");
    ctx.match_literal("x").unwrap();
    assert!(ctx.match_terminal(r"\bfoo").is_err());
    assert_eq!(ctx.match_terminal(r"\Bfoo").unwrap(), "foo");
    ctx.match_literal(" ").unwrap();
    assert_eq!(ctx.match_terminal(r"\bfoo\b").unwrap(), "foo");
}

#[test]
fn test_start_anchor_only_at_input_start() {
    let mut ctx = ParserContext::new("ab\nc");
    assert_eq!(ctx.match_terminal("^a").unwrap(), "a");
    assert!(ctx.match_terminal("^b").is_err());
    ctx.match_literal("b\n").unwrap();
    assert!(ctx.match_terminal("^c").is_err());
    assert_eq!(ctx.match_terminal("(?m)^c$").unwrap(), "c");
}

#[test]
fn test_match_terminal_advances() {
    let mut ctx = ParserContext::new("123abc");
    assert_eq!(ctx.match_terminal("[0-9]+").unwrap(), "123");
    assert_eq!(ctx.offset(), 3);
    assert_eq!(ctx.position().column, 4);
    assert_eq!(ctx.remaining(), "abc");
}

#[test]
fn test_match_terminal_tracks_lines() {
    let mut ctx = ParserContext::new("a\nb\nc");
    ctx.match_terminal("a\\nb\\n").unwrap();
    assert_eq!(
        ctx.position(),
        Position {
            offset: 4,
            line: 3,
            column: 1
        }
    );
}

#[test]
fn test_match_terminal_failure_leaves_frame() {
    let mut ctx = ParserContext::new("abc");
    ctx.match_literal("a").unwrap();
    let before = ctx.position();
    let signal = ctx.match_terminal("[0-9]").unwrap_err();
    assert!(signal.is_backtrack());
    assert_eq!(ctx.position(), before);
    assert_eq!(
        ctx.tracker().at(1).unwrap().message(),
        "expected `[0-9]`, found `bc`"
    );
}

#[test]
fn test_match_terminal_at_end_of_input() {
    let mut ctx = ParserContext::new("ab");
    ctx.match_literal("ab").unwrap();
    assert!(ctx.match_terminal("[a-z]").is_err());
    assert_eq!(
        ctx.finalize().message,
        "expected `[a-z]`, found end of input"
    );
}

#[test]
fn test_match_terminal_invalid_expression_is_fatal() {
    let mut ctx = ParserContext::new("abc");
    let signal = ctx.match_terminal("[").unwrap_err();
    assert!(matches!(signal, Signal::Fatal(_)));
    assert!(ctx.tracker().is_empty());
}

#[test]
fn test_same_expression_cached_across_matches() {
    let mut ctx = ParserContext::new("aaa");
    for _ in 0..3 {
        ctx.match_terminal("a").unwrap();
    }
    assert_eq!(ctx.patterns().len(), 1);
}

#[test]
fn test_zero_width_terminal() {
    let mut ctx = ParserContext::new("abc");
    assert_eq!(ctx.match_terminal("[0-9]*").unwrap(), "");
    assert_eq!(ctx.offset(), 0);
}

#[test]
fn test_unicode_terminal_columns() {
    let mut ctx = ParserContext::new("ééx");
    assert_eq!(ctx.match_terminal("é+").unwrap(), "éé");
    assert_eq!(ctx.offset(), 4);
    assert_eq!(ctx.position().column, 3);
}

#[test]
fn test_match_literal() {
    let mut ctx = ParserContext::new("let x");
    assert_eq!(ctx.match_literal("let").unwrap(), "let");
    assert!(ctx.match_literal("let").is_err());
    assert_eq!(ctx.offset(), 3);
    assert!(ctx.patterns().is_empty());
}

#[test]
fn test_not_succeeds_without_consuming() {
    let mut ctx = ParserContext::new("b");
    ctx.not("a").unwrap();
    assert_eq!(ctx.offset(), 0);
    assert_eq!(ctx.depth(), 1);
    assert!(ctx.tracker().is_empty());
}

#[test]
fn test_not_records_inner_mismatch_when_configured() {
    let config = crate::RuntimeConfig::default().with_lookahead_failures(true);
    let mut ctx = ParserContext::with_config("b", config);
    ctx.not("a").unwrap();
    assert_eq!(ctx.offset(), 0);
    assert_eq!(
        ctx.tracker().at(0).unwrap().message(),
        "expected `a`, found `b`"
    );
}

#[test]
fn test_not_fails_without_consuming() {
    let mut ctx = ParserContext::new("abc");
    let signal = ctx.not("a").unwrap_err();
    assert!(signal.is_backtrack());
    assert_eq!(ctx.offset(), 0);
    assert_eq!(ctx.depth(), 1);
    assert_eq!(
        ctx.finalize().message,
        "expected anything but `a`, found `abc`"
    );
}

#[test]
fn test_not_drops_bindings() {
    let mut ctx = ParserContext::new("b");
    ctx.not_followed_by("a", |ctx| {
        ctx.set("leak", "yes", true);
        ctx.match_literal("a")
    })
    .unwrap();
    assert_eq!(ctx.lookup("leak"), None);
}

#[test]
fn test_not_propagates_fatal() {
    let mut ctx = ParserContext::new("b");
    assert!(matches!(ctx.not("("), Err(Signal::Fatal(_))));
    assert_eq!(ctx.depth(), 1);
}
