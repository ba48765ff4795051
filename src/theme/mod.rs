//! Theme manifest model and the generate pipeline that builds it.
mod build;
mod model;

pub(crate) use build::{build_theme, write_theme, THEME_FILE};
