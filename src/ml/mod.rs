//! Machine learning helpers for training and inference.
//!
//! These utilities are developer-facing building blocks used to train decision trees and
//! load/predict in Rust.

pub mod id3;
pub mod metrics;
