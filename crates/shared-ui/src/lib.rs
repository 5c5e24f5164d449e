//! Presentation components shared by the field report screens.

pub mod components;

pub use components::*;
