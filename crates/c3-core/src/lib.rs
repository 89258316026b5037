#![forbid(unsafe_code)]

//! Core: geometry, animation physics, reactive values, and resize handling.
//!
//! # Role in Cuentohasta3
//! `c3-core` is the platform-agnostic layer underneath the site's
//! interactive pieces. It knows nothing about menus or pages; it provides
//! the primitives those components are built from.
//!
//! # Primary responsibilities
//! - **Geometry**: points, dimensions, and circular clip regions.
//! - **Animation**: spring physics, delayed retargetable tracks, and stagger
//!   offsets for orchestrated entrances and exits.
//! - **Reactive values**: [`reactive::Observable`] with RAII subscriptions.
//! - **Resize coalescing**: trailing debounce for resize bursts.
//! - **Logging**: one-time subscriber installation for binaries.
//!
//! # How it fits in the system
//! `c3-menu` composes these primitives into the slide-out navigation menu,
//! and `c3-harness` drives that menu headlessly. Everything here is
//! single-threaded and deterministic for a given sequence of ticks.

pub mod animation;
pub mod geometry;
pub mod logging;
pub mod reactive;
pub mod resize_coalescer;
