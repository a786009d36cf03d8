//! Build-your-own module.
//!
//! A three-step wizard (base, fruits, add-ons) that prices a custom smoothie
//! and turns it into a cart item.

mod wizard;

pub use wizard::{BuilderStep, SmoothieBuilder, Toggle, CUSTOM_COLOR, CUSTOM_EMOJI};
