//! Navigation logic for mFiles.
//!
//! This module contains the cursor and multi-selection model
//! ([`selection::Selection`]), the [`panel::Panel`] trait with its
//! [`panel::BrowserPanel`] implementation, and directory changes
//! ([`navigator`]).

pub mod navigator;
pub mod panel;
pub mod selection;
