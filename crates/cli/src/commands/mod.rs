pub mod rvd;
pub mod search;
