pub mod config;
pub mod derivative;
pub mod error;
pub mod scanline;
pub mod types;
