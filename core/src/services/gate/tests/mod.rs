//! Unit tests for the mutation gate

mod gate_tests;
