// Library root for the courtside command-line front end: configuration,
// corpus loading, surface assembly and rendering. Re-exported so integration
// tests can drive the same code paths as the binary.

pub mod config;
pub mod data;
pub mod render;
pub mod views;
