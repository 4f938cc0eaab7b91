//! # Bileto
//!
//! `bileto` is a small support-ticket desk served over HTTP: user
//! registration, login, and logout with Argon2id password hashing and
//! PASETO session cookies, plus ticket creation and retrieval backed by
//! PostgreSQL.
//!
//! Every auth and ticket operation answers with the same
//! `{success, message}` envelope; failures are logged as structured
//! events and never surface as raw faults.

pub mod bileto;
pub mod cli;
