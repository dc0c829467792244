//! HTML-facing web layer: page handlers backed by Askama templates.

pub mod handlers;
