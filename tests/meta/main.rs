//! Structural checks on the unit test tree
