//! Magic Sturdy keymap for the ZSA Voyager.
//!
//! The keymap is a set of compile-time tables plus a few callbacks the firmware calls
//! while processing keys and refreshing the LEDs:
//!
//! - [`keymap`]: three layers of key actions, home row mods and dual-role thumb keys
//! - [`tap_hold`]: per-key tapping term
//! - [`magic`]: what the magic (alternate repeat) key sends after each key
//! - [`keyboard_macros`]: text macros sent by the magic key
//! - [`ledmap`]: per-key layer colors
//!
//! [`hooks::MagicSturdy`] bundles the callbacks behind the [`hooks::KeyboardHooks`] trait.
//! [`keyboard::Keyboard`] is a small synchronous key processor which drives the hooks the
//! way the firmware does: layer stack, tap/hold decisions, repeat key state and HID reports.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod descriptor;
pub mod eeconfig;
pub mod error;
pub mod event;
pub mod hooks;
pub mod keyboard;
pub mod keyboard_macros;
pub mod keymap;
mod layout_macro;
pub mod ledmap;
pub mod magic;
pub mod reporter;
pub mod rgb_matrix;
pub mod tap_hold;

pub use heapless;
pub use magicsturdy_types as types;
