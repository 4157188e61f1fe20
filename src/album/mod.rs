//! Album loading and page construction.
//!
//! An album is an ordered list of image references. [`assemble::assemble`] turns
//! it into double-sided pages, [`faces::book_faces`] decides which part of which
//! image each page face shows.

pub mod assemble;
pub mod faces;
pub mod source;
