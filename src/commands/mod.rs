pub mod classify;
pub mod prepare;
pub mod sample;
pub mod score;
