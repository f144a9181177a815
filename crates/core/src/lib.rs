//! Core domain for the almanac calendar service.
//!
//! This crate provides:
//! - Event, occurrence and recurrence-rule types
//! - Occurrence expansion and the occurrence-identity scheme
//! - Exclusion tracking for recurring series
//! - The async storage traits the service layer persists through
//!
//! Everything is pure computation; no I/O happens here. Recurring series
//! are stored as a single master row and expanded on demand, so edits to
//! one occurrence work through exclusions, synthesized occurrence ids and
//! override rows rather than materialized occurrence storage.

pub mod calendar;
pub mod storage;
