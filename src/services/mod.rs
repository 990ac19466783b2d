pub mod identity;
pub mod seed;
