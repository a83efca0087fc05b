//! Data models

pub mod application;
pub mod decision;

pub use application::*;
pub use decision::*;
