#![allow(dead_code)]

pub mod datasets;
pub mod id3_env;
