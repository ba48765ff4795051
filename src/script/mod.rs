//! Script-side extraction: tokenizer, restricted literal parser and the
//! `props` slicer built on both.
mod lexer;
mod literal;
mod props;

pub(crate) use props::{extract_props, PropertyMap};
