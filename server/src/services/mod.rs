//! Background services

pub mod health_probe;
