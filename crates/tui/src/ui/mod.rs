//! UI layer: components, theme and the terminal runtime.

pub mod components;
pub mod runtime;
pub mod theme;
