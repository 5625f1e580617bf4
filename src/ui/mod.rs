pub mod cards;
pub mod detail;
pub mod panels;
