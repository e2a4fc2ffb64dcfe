//! Client-side tabular derivation pipeline.
//!
//! Every view runs its fetched rows through the same stages:
//! column filters -> grouping/aggregation -> sort -> pagination -> view
//! rows. The stages are plain functions over plain data so they can be
//! tested without a DOM.

pub mod filter;
pub mod group;
pub mod normalize;
pub mod paginate;
pub mod sort;
pub mod store;
pub mod view;
