//! Girder - a decision-record relationship tracker.
//!
//! This crate provides both a CLI application and a library for tracking
//! RFC proposals, ADR decision records, and decomposition plans as a graph
//! of typed bidirectional links, with renderers, cycle detection, and
//! impact analysis built on top.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod graph;
pub mod ident;
pub mod impact;
pub mod links;
pub mod store;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Application wiring and output formatting
pub mod app;
pub mod config;
pub mod output;
