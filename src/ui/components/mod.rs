pub mod input;
pub mod menu;
