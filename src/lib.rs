//! Storefront is the transformation core of a B2B commerce front-end. It
//! turns catalog search and browse intents into search-engine query
//! documents and assembles order/quote submission payloads from layered
//! form state.
//!
//! The layered structure of the app is
//!
//! `UI handlers (external) -> Service -> Models`
//!
//! Services are pure and synchronous: they neither perform I/O nor hold
//! mutable state, so every invocation receives fresh inputs and returns a
//! fresh value. Transport, persistence and authentication live in the
//! surrounding application and are not part of this crate.

extern crate chrono;
extern crate config as config_crate;
#[macro_use]
extern crate derive_more;
extern crate enum_iterator;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate validator;

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
