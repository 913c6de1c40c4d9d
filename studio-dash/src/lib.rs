#![allow(clippy::new_without_default)]

pub mod action;
pub mod chart;
pub mod controller;
pub mod data;
pub mod logging;
pub mod render;
pub mod sink;

pub use crate::{
    action::Action,
    controller::ViewController,
    sink::{MemorySink, Patch, ViewSink},
};
