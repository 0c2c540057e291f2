//! Tests for generator services
//!
//! HTTP-facing services run against a local wiremock server; file-backed
//! services run inside temporary directories.
