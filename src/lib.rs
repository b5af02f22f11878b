pub mod breeder;
pub mod codec;
pub mod config;
pub mod error;
pub mod evolution;
pub mod key;
pub mod population;
pub mod scorer;
// cmd and reports are binary modules (in main.rs or distinct files).
