//! Utility modules shared by the front ends.

pub mod clipboard;
pub mod hash;
pub mod html;
pub mod log;
pub mod minify;
