// src/common.rs

pub mod debounce;
pub mod error;
pub mod sequence;
