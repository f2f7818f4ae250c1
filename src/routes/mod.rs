//! Router Module Index
//!
//! Splits the API by whether the viewer identity is needed.

/// Routes that answer the same for everyone.
pub mod public;

/// Routes rendered for the resolved viewer. Wrapped in the viewer middleware.
pub mod console;
