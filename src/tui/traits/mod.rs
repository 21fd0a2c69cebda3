//! Component trait system for TUI architecture
//!
//! This module defines the contracts that UI components implement.
//! Instead of the host knowing how to render or route keys for every
//! widget, components declare their own capabilities through traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │   (orchestrator: owns the document, routes input, draws)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!        ┌──────────┐                    ┌──────────┐
//!        │ Dropdown │                    │   Logs   │
//!        │          │                    │  Panel   │
//!        └──────────┘                    └──────────┘
//!                              │
//!                     Implements traits:
//!                   Component, Interactive
//! ```
//!
//! # Traits Overview
//!
//! - [`Component`] - Base trait: render + identity
//! - [`Interactive`] - Components that handle keyboard input

mod component;
mod interactive;

pub use component::{Component, ComponentId, RenderContext};
pub use interactive::{Handled, Interactive};
