//! Integration-style tests for the tool surface.

mod spec_tests;
