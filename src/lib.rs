//! Adaptive coaching context engine for a bilingual (Arabic/English) fitness coach.
//!
//! The crate turns a raw chat message plus a user profile into a fully
//! assembled model context: signal detection, per-user behavioral state,
//! mode resolution (maternal health, disability, accessibility), progress
//! accounting, and a completion gateway, exposed over a small HTTP API.

#![deny(unsafe_code)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(non_upper_case_globals)]
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
#![deny(overflowing_literals)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

/// Static reference tables: message pools, videos, exercises, equipment,
/// safety alerts, persona instructions.
#[allow(clippy::unicode_not_nfc)]
pub mod catalog;
/// Pure signal detectors (language, emotion, keywords, preferences).
pub mod detect;
/// Core engine: ids, errors, config, state, store, metrics, orchestration.
pub mod engine;
/// Completion gateway and accessibility post-formatting.
pub mod gateway;
/// Mode resolvers (pregnancy, postpartum, diastasis, disability,
/// accessibility, deaf, workout, nutrition, inactivity, media).
#[allow(clippy::too_many_lines, clippy::unicode_not_nfc)]
pub mod modes;
/// HTTP server and API routes.
#[allow(clippy::missing_errors_doc, clippy::unused_async)]
pub mod server;
/// Entry helpers to start the coaching server.
pub mod startup;
/// Profile persistence collaborators.
pub mod storage;
