//! Hack X-Ray - Lab Report pipeline for AI-analyzed money hacks.
//!
//! This crate turns raw, unreliable model output into a canonical,
//! business-rule-consistent Lab Report: extraction and truncation repair,
//! normalization with safe defaults, structural and coherence validation,
//! unsafe-phrase screening, and a deterministic fallback report when the
//! model output cannot be recovered.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
