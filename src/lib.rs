//! Tagged feed bookmarks persisted in a key/value store.
//!
//! The storage side ([`store`], [`repository`]) is independent of the
//! terminal front end ([`app`], [`input`], [`ui`]); the binary in `main.rs`
//! wires the two together through [`worker`].

pub mod app;
pub mod config;
pub mod feed;
pub mod input;
pub mod launch;
pub mod repository;
pub mod store;
pub mod ui;
pub mod worker;
