//! reportminer - Game industry report analysis and cataloging system.
//!
//! A tool for extracting text from PDF industry reports, deriving structured
//! metadata through keyword and regex heuristics, and maintaining a shared
//! JSON document collection.

pub mod analysis;
pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod extract;
pub mod models;
pub mod store;
