//! Unit tests for planmark.

mod drag_select_tests;
