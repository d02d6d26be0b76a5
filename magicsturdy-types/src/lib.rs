//! # Magic Sturdy Types
//!
//! Fundamental type definitions shared by the Magic Sturdy keymap.
//!
//! ## Modules
//!
//! - [`action`] - What a key does: plain keys, shifted keys, tap/hold, layers, macros, repeat keys
//! - [`keycode`] - HID keyboard keycodes and en-US ASCII conversion
//! - [`modifier`] - Modifier combinations used in the keymap and in HID reports
//! - [`color`] - HSV/RGB color triples for per-key backlighting

#![no_std]

pub mod action;
pub mod color;
pub mod keycode;
pub mod modifier;
