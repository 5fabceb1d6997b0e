//! HTTP client for the ESP8266 LED controller.

pub mod client;
pub mod error;

pub use client::{DeviceClient, LedCommand};
pub use error::DeviceError;
