pub mod billing;
pub mod health;
