//! Presentation values: themes and render-ready timer views

pub mod theme;
pub mod view;

pub use theme::{Palette, Rgb, Theme, DARK, LIGHT};
pub use view::{TimerView, COUNTDOWN_LABEL};
