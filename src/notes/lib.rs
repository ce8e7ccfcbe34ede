//! # Notes Architecture
//!
//! A small notebook: each note is a title, some text and two timestamps, kept in
//! a single transactional database file under `~/.notes/`. The library does all
//! the work; the `notes` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, launches the editor    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade that owns the store and the title validator  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One repository operation per module                      │
//! │  - Each operation is exactly one store transaction          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Notes (id -> record) and NotesTitle (title -> id)        │
//! │  - redb file in production, in-memory backend in tests      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! From the command layer down, every committed state satisfies:
//!
//! - each title maps to at most one note, and each note has exactly one index entry
//! - an index entry's id names an existing record whose title is that entry's key
//! - a failed operation leaves both buckets exactly as they were
//!
//! `doctor` checks these on an existing database and can repair the two
//! recoverable kinds of drift.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all note operations
//! - [`commands`]: Create, get, update, delete, list, doctor, config
//! - [`store`]: Transactional two-bucket storage
//! - [`model`]: The [`model::Note`] record
//! - [`codec`]: Note <-> bytes
//! - [`validation`]: Title rules
//! - [`sort`]: Ordering for listings
//! - [`config`]: `.notes/config.json`
//! - [`paths`]: Where `.notes/` lives
//! - [`editor`]: External editor integration
//! - [`error`]: Error types
//! - `cli`: Argument parsing, logging setup and printing for the binary (not part of the lib API)

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod paths;
pub mod sort;
pub mod store;
pub mod validation;
