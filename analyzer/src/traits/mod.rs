//!
//! Traits Module
//!
//! This module contains the seams of the analysis pipeline.
//!
//! - [`extractor`]: Converts the bytes of one document format into text.
//! - [`model_client`]: Sends a prepared request to a language model.
//!
//! Implement these traits to support new document formats or model providers.

pub mod extractor;
pub mod model_client;
