// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Randomly generated infrastructure and access snapshots checked against
//! the hierarchy and integrity rules of the compiler.

mod access_invariants;
mod infra_invariants;
