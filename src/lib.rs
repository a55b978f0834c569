// src/lib.rs

//! Homework review notifier library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
