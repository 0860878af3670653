//! HTTP route handlers

pub mod developers;
