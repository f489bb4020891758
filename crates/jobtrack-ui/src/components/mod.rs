//! Reusable presentational atoms.

pub(crate) mod icon_button;
pub(crate) mod icons;
