//! HTTP handlers for donki-service.
//!
//! `notifications` is the public surface; `health` is only mounted on the ops
//! listener.

pub mod health;
pub mod notifications;
