//! PASCAL VOC 2007 object detection data pipeline.

mod common;

pub mod config;
pub mod data_stream;
pub mod dataset;
pub mod format;
pub mod label;
pub mod processor;
pub mod shuffle;
pub mod tensor;
pub mod unit;
