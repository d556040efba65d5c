pub mod cli;
pub mod error;
pub mod find;
pub mod listing;
pub mod modes;
pub mod ops;
pub mod sessions;
pub mod utils;
