// src/common/mod.rs

pub mod error;
pub mod format;
pub mod math;
