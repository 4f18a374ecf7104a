//! End-to-end tests: small grammars written the way generated parsers are.
//!
//! - `grammars`: terminals, choice, repetition, recursion and error reports
//! - `bindings`: grammars whose actions store and read variables
