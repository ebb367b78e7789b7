//! Integration tests for the adapter
//!
//! These tests serve saved site pages from a wiremock server and drive the
//! adapter end-to-end. Rendered pages come from a fake renderer so no browser
//! is needed.

mod adapter_tests;
mod pages_tests;
