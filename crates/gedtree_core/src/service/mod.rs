//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate parsing and tree construction into request-level APIs.
//! - Keep CLI and host layers decoupled from parser internals.

pub mod family_tree_service;
