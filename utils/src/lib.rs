//! Shared utilities for the Chirp workspace.

pub mod version_info;
