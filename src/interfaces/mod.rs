//! Interface layer

pub mod http;
