pub mod common;
mod transport_tests;
