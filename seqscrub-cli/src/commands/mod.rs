//! Command implementations for the seqscrub CLI

pub mod check;
pub mod clean;
pub mod report;
