//! Shared utilities for the WriteWise workspace.

pub mod config;
