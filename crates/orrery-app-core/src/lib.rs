// SPDX-License-Identifier: Apache-2.0
//! Shared application services for the Orrery viewer (config, prefs,
//! redraw port). Keeps UI/runtime adapters thin and framework-agnostic.

pub mod config;
pub mod prefs;
pub mod render_port;
