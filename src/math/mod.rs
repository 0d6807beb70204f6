pub mod utils;
pub mod vec2;
