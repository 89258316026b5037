#![forbid(unsafe_code)]

//! Reactive values with change notification.
//!
//! Hosts publish viewport and layout changes through an [`Observable`];
//! components that care subscribe and hold the returned [`Subscription`]
//! for as long as they are mounted.

pub mod observable;

pub use observable::{Observable, Subscription};
