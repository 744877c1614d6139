pub mod health;
pub mod render;
