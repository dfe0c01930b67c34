pub mod benchmark;
pub mod corpus;
pub mod tune;
