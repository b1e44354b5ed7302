//! Application services: use-case orchestration over the ports.

pub mod completion;
pub mod controller;
