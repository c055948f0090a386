pub mod error;
pub mod passes;
