//! Property-based tests for document and edit invariants

mod edits;
mod round_trip;
