#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod client;
pub mod coord;
pub mod event;
pub mod expiry;
pub mod network;
pub mod notice;
pub mod options;
pub mod render;
pub mod stone;
pub mod test_util;
