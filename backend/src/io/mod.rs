//! # IO Layer
//!
//! Interface layer that exposes the domain services over HTTP.

pub mod rest;
