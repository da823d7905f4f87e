//! Shared UI crate for Rollcall. Cross-platform logic and views live here;
//! routing belongs to the platform crate.

pub mod capture;
pub mod chat;
pub mod components;
pub mod core;
pub mod report;
pub mod views;
