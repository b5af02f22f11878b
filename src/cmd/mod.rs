pub mod crack;
pub mod score;
