//! # tzc-core
//!
//! Core types, identifier validation, and error types for mysql-tz-converter.
//!
//! This crate provides the foundational types shared across all converter crates:
//! - Entity structs for temporal columns, table groups, and conversion outcomes
//! - Enums for temporal SQL types, statement strategies, and terminal run states
//! - The read-only `RunContext` built once per run
//! - Identifier validation for SQL text interpolation
//! - Cross-cutting error types
//! - Run report types serialized by `--format json`

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identifier;
pub mod responses;
pub mod run;
