pub mod annealer;
pub mod config;
pub mod corpus;
pub mod error;
pub mod problem;
pub mod scorer;
pub mod tuner;
// cmd and reports are modules of the binary crate (main).
