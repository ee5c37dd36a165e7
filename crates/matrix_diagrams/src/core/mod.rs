//! Core framework modules

pub mod config;
