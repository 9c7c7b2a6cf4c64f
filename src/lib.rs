//! formforge: a form-builder core
//!
//! Models forms as ordered lists of typed fields, optionally grouped into
//! steps, with a single validation engine shared by the builder preview and
//! the filler. Persistence is one JSON document per form plus an append-only
//! submission log.
//!
//! Layered architecture:
//! - `domain`: pure form model, validation engine, fill/builder sessions
//! - `application`: services orchestrating persistence and submissions
//! - `infrastructure`: JSON-file stores behind boundary traits, DI wiring
//! - `cli`: clap argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
