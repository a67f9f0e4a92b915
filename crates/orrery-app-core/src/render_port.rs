// SPDX-License-Identifier: Apache-2.0
//! Port trait for requesting a redraw on the underlying surface/window
//! without depending on a specific windowing crate.

/// Minimal redraw port; implementations are expected to be cheap and
/// typically just forward to a windowing surface's `request_redraw`.
/// This is the scheduling primitive behind the viewer's frame loop:
/// each call schedules exactly one future frame callback.
pub trait RenderPort {
    /// Request a redraw of the main surface/window.
    fn request_redraw(&self);
}
