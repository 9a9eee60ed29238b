// src/debug/mod.rs

//! The `debug` module is macros for printing warnings and errors,
//! some limited to debug and test builds.

pub mod printers;
