//! Property-based tests for conflict detection.
