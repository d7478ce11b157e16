//! API layer - REST and native in-process client

pub mod native;
pub mod rest;
