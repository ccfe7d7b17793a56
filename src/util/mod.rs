#![cfg(test)]

pub mod alloc;
pub mod hash;
pub mod log;
pub mod panic;
