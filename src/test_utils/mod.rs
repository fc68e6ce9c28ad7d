//! Shared test utilities for the S-Miles Cloud to InfluxDB2 forwarder.
//!
//! Configuration builders, canned API responses and mock servers used
//! throughout the test suite.

#![cfg(test)]

pub mod config;
pub mod fixtures;
pub mod mocks;
