//! Outbound HTTP access to the reference data and submission endpoints

mod client;
mod traits;

pub use client::{ClientError, HttpClient};
pub use traits::RemoteApi;

#[cfg(test)]
pub use traits::MockRemoteApi;
