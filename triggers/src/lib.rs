// Shared trigger-schedule definitions for the scheduler and its tooling

pub mod errors;
pub mod schedule;
