pub mod describe;
mod main_menu;
mod table;

pub use main_menu::{MainMenu, Mode};
pub use table::clickable_rows;
