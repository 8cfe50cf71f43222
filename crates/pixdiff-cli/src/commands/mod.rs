pub mod diff;
pub mod info;
pub mod sample;
