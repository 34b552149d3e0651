//! Integration tests for site-pulse
//!
//! These tests use wiremock to stand in for the site list server and the
//! monitored sites, and run real cycles end-to-end.

mod monitor_tests;
