pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, none_found, success, summary_row};
pub use table::{categories_table, flashcards_table, products_table, stats_table};
pub use theme::{theme, Theme};
