//! Crate-level test suites.
//!
//! Per-module unit tests live next to the code they cover; these suites cut
//! across modules: the concrete end-to-end scenarios, property-based checks,
//! and a regression suite of hostile injection payloads.
