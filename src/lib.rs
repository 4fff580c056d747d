//! Shopee affiliate link converter
//!
//! Rewrites Shopee product links so that the tracking parameters credit a
//! given affiliate ID, resolving `s.shopee.com.br` short links first.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: One-shot command-line conversion (default)
//!
//! # Architecture
//! - `affiliate`: Link rewriting core (tracking rules, redirect resolution)
//! - `api`: HTTP services and middleware
//! - `interfaces`: Command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod affiliate;
#[cfg(feature = "server")]
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod system;
