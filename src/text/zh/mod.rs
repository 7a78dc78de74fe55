// text/zh/mod.rs
pub mod jyutping_list;
pub mod mandarin;
pub mod tupa;
