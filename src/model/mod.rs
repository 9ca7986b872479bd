//! Core data model for checkpoint history
//!
//! This module contains pure data structures with minimal external dependencies.

pub mod checkpoint_store;
pub mod delta_chain;
pub mod document;
pub mod edit;
pub mod memory;
pub mod session;
