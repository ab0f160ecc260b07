//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for origins, movement types, articles and technicians
pub mod autocomplete;
