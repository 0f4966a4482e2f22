#![doc = include_str!("../README.md")]
//! ## Contents
//!
//! - [`LabeledDataset`] — random-access reader for the labeled subset file
//! - [`Sample`] — one aligned (color, depth, label, scene) record
//! - [`DatasetError`] — everything that can go wrong while reading
//!
//! The container layout this crate expects is the one shipped by the
//! dataset authors: top-level arrays `images` (N×3×H×W), `depths` (N×H×W),
//! `labels` (N×H×W), plus the `sceneTypes`/`scenes`/`names` reference
//! tables whose entries point at per-string character-code datasets.
#![warn(missing_docs)]

mod error;
mod labeled;
mod orient;
mod string_ref;

pub use crate::{
    error::{DatasetError, Result},
    labeled::{LabeledDataset, Sample},
    orient::DepthImage,
};
