//! HTTP route handlers

pub mod sessions;
pub mod submissions;
pub mod teacher;
