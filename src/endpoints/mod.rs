pub mod account;
pub mod catalog;
pub mod league;
pub mod match_v5;
