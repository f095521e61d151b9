//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - The key-value store trait
//! - [`keys`] - Logical key layout shared by every service
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves the short code
//! 2. [`click_event::ClickEvent`] is sent to async channel
//! 3. [`click_worker::run_click_worker`] drains the channel
//! 4. Counters, visitor set and click log are updated via
//!    [`crate::application::services::ClickService`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod keys;
pub mod repositories;
