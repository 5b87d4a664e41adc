//! Item editor state: snap sliders and the workshop draft.

pub mod snap_slider;
