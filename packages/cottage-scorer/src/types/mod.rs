//! Data types shared by every pipeline stage.

pub mod config;
pub mod criterion;
pub mod example;
pub mod listing;
pub mod result;
pub mod scores;
