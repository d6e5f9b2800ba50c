//! Charge aggregate (`cargo`)
//!
//! A billing obligation for one enrollment in one period. Charges are only
//! ever created by the generator; nothing in this crate updates or deletes
//! them.

pub mod model;
pub mod repository;

pub use model::{Charge, ChargeStatus, NewCharge};
pub use repository::ChargeRepository;
