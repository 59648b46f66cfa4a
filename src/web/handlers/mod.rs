pub mod classify;
pub mod help;
