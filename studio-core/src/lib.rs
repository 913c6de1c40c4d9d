pub mod config;
pub mod demo;
pub mod error;
pub mod model;
pub mod webapi;

pub use crate::{
    config::Config,
    error::{FetchError, FetchErrorKind, FetchResult},
};
