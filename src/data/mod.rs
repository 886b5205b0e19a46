//! Per-entity repositories over the durable store.
//!
//! Every lookup returns `Option` — a missing row is a valid state, never an
//! error. The synchronizer decides create-vs-update purely from that
//! `Option`; repositories perform no existence checks of their own.

pub mod alliance;
pub mod character;
pub mod clone;
pub mod contact;
pub mod corporation;
pub mod etag;
pub mod implant;
pub mod skill;
pub mod solar_system;
pub mod user;
