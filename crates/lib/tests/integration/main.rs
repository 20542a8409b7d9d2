//! End-to-end builds against a fake toolchain.
#![cfg(unix)]

mod build_tests;
mod cache_tests;
mod common;
