//! Data types for the compiler: configuration, input bundles and output.

pub mod compilation;
pub mod config;
pub mod response;
