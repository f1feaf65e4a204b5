//! Booking use-case services.
//!
//! # Responsibility
//! - Orchestrate boundary decoding, the availability engine and the store.
//! - Keep CLI/transport layers decoupled from storage details.

pub mod booking_service;
pub mod context;
