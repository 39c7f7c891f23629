//! Route handlers, grouped by resource

pub mod home;
pub mod observations;
pub mod stations;
pub mod temperature;
