pub mod render;
pub mod tokens;
