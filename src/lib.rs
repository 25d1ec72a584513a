//! # GyverLamp Control Library
//!
//! `gyver-control-lib` is a Rust library for controlling GyverLamp-compatible
//! Wi-Fi LED lamps. It provides a client for the lamp's plaintext UDP
//! protocol, allowing users to query and change the lamp's visual mode,
//! brightness, speed, scale and power, and to manage its weekly alarm
//! ("dawn") schedule.
//!
//! This library is designed to be used by command-line tools or other client
//! applications that require control over GyverLamp devices.
//!
//! ## Features
//!
//! - Query and change the current lamp state over UDP
//! - Power control, including a toggle helper
//! - Weekly alarm schedule management with gradual-wake "dawn" presets
//! - Static catalogs mapping mode ids to bilingual display names and dawn
//!   ids to durations
//!
//! ## Example
//!
//! Here is a simple example of how to use the library to switch a lamp to
//! the "Fire" mode at half brightness:
//!
//! ```no_run
//! use gyver_control_lib::control_interface::LampClient;
//! use gyver_control_lib::modes::visual::VisualModes;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut lamp = LampClient::new("192.168.1.100", 8888).await?;
//!
//!     if let Some(fire) = VisualModes::by_name("Fire") {
//!         let state = lamp.set_mode(fire).await?;
//!         println!("Lamp is now in mode {}", state.mode_id);
//!     }
//!     lamp.set_brightness(128).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The protocol has no delivery guarantee and no reply correlation: a lamp
//! that never answers will block the pending operation forever. Callers that
//! need bounded latency should wrap operations in [`tokio::time::timeout`].
//!
//! ## Disclaimer
//!
//! This project is not affiliated with, authorized by, or endorsed by the
//! GyverLamp firmware authors. It speaks the lamp's open UDP protocol as
//! implemented by the stock firmware.
//!
//! ## License
//!
//! This project is dual-licensed under the MIT License and the Apache
//! License, Version 2.0. You may choose to use either license, depending on
//! your project needs.

// The `control_interface` module provides the client for communicating with
// a lamp. It includes methods for sending commands, querying lamp status,
// and managing the alarm schedule.
//
// Example usage:
//
// ```
// use gyver_control_lib::control_interface::LampClient;
//
// #[tokio::main]
// async fn main() {
//     let mut lamp = LampClient::new("192.168.1.100", 8888).await.unwrap();
//     let state = lamp.get_state().await.unwrap();
//     println!("brightness: {}", state.brightness);
// }
// ```
pub mod control_interface;

// The `modes` module contains the fixed catalogs the lamp firmware ships
// with: the 18 visual modes and the 9 dawn durations. Lookups are pure
// functions over static tables and need no client instance.
//
// Example usage:
//
// ```
// use gyver_control_lib::modes::dawn::DawnModes;
//
// let half_hour = DawnModes::by_minutes(30).unwrap();
// assert_eq!(half_hour.id, 5);
// ```
pub mod modes;
