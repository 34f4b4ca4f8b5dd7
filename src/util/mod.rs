//! Data structures shared by agents

pub mod counter;
