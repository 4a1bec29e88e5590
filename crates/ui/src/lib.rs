//! Courier UI - Presentation layer
//!
//! This crate holds the command/update protocol between a front-end and the
//! controller task, the controller itself, and a line-oriented console
//! front-end built on top of them.

pub mod bridge;
pub mod console;
mod controller;

pub use bridge::{Notice, NoticeLevel, TabData, TabRef, UiCommand, UiUpdate};
pub use controller::{Controller, ControllerHandle};
