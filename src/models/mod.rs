pub mod account;
pub mod league;
pub mod match_row;
