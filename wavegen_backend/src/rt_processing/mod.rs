pub mod controller;
pub mod performance;
pub mod transmit;
