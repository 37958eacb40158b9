//! # coolpropx
//!
//! Fluid properties on a Helmholtz-energy low-level interface, with the
//! pieces a plain property call leaves out: metastable states inside the
//! two-phase region, spinodal lines, generalized quality and
//! supersaturation, and phase-diagram curves.
//!
//! ## Crate layout
//!
//! - [`thermo`]: states, property errors, capability traits, substances, and
//!   the property models ([`thermo::model`]).
//! - [`fluid`]: the [`Fluid`](fluid::Fluid) wrapper that turns a property
//!   backend into named states, lists and grids.
//! - [`phase`]: saturation, spinodal, pseudocritical and quality lines.
//! - [`support`]: supporting utilities (units, numeric constraints, the
//!   scalar root finder).
//!
//! The [`PengRobinson`](thermo::model::PengRobinson) model is always
//! available. The `coolprop` feature adds a
//! [`CoolProp`](thermo::model::CoolProp) backend through `rfluids`.
//!
//! Modules in [`support`] are public because they're useful, but their APIs
//! are not stable.
//!
//! ## Logging
//!
//! Solvers and the fluid wrapper emit [`tracing`] events: `debug` for
//! converged solves and constructed fluids, `trace` for bisection details,
//! and `warn` when a grid point is replaced by an undefined state. The crate
//! installs no subscriber.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod fluid;
pub mod phase;
pub mod support;
pub mod thermo;
