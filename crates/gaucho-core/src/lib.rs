//! Opener pipeline and report logic for GauchoChat.
//!
//! This crate defines the "ports" (provider and state-source traits) that the
//! infrastructure layer implements. It depends only on `gaucho-types` --
//! never on `gaucho-infra` or any network/IO crate.

pub mod llm;
pub mod opener;
pub mod report;
