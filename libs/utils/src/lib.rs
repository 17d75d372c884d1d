#[macro_use]
extern crate tracing;

mod cv;

pub use cv::*;
