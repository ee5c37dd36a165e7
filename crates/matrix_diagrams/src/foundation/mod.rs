//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the framework:
//! - Math types for layout coordinates
//! - Logging utilities

pub mod math;
pub mod logging;
