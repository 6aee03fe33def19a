//! # Ports Layer
//!
//! - **Outbound (Driven)**: the device and the byte channel it sits behind

pub mod outbound;
