//! Core engine configuration shared by applications

pub mod config;
