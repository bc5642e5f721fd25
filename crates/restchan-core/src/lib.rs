//! Core types for a channel-scoped REST client façade.
//!
//! The REST transport lives behind the [`service::ChannelService`] port; this
//! crate only binds channel ids to a shared [`client::RestClient`] and forwards
//! calls to it.

pub mod client;
pub mod config;
pub mod domain;
pub mod entity;
pub mod errors;
pub mod json;
pub mod logging;
pub mod multipart;
pub mod service;

pub use client::RestClient;
pub use entity::channel::RestChannel;
pub use errors::{Error, Result};
