pub mod activities;
pub mod attendance;
pub mod health;
pub mod profile;
pub mod reports;
pub mod schedule;
pub mod seed;
