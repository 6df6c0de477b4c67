pub mod convert;
pub mod freeze;
pub mod interpolate;
pub mod potcar;
pub mod vacuum;
