// Fusen shared type definitions
// Each submodule defines plain data used across the client.

pub mod bookmark;
pub mod errors;
pub mod presentation;
pub mod settings;
