pub mod catalog;
pub mod ratings;
pub mod recommendations;
pub mod recommenders;
