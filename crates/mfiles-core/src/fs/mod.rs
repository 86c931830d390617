//! File system abstractions for mFiles.
//!
//! This module provides the entry type ([`entry::FileEntry`]), the ordered
//! directory listing ([`listing::Listing`]) and the copy/move/create
//! operations used by paste and the new-file dialog ([`ops`]).

pub mod entry;
pub mod listing;
pub mod ops;

pub use listing::{Listing, ListingOptions};
