//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against the mock board. All tests run on the host with no real
//! hardware required.

mod boot_tests;
mod control_loop_tests;
mod mock_hw;
mod protocol_tests;
