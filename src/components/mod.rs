pub mod catalog_list;
pub mod detail_overlay;
pub mod filter_bar;
pub mod monster_screen;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use catalog_list::{CatalogList, CatalogListProps, FAILED_TITLE, LOADING_TEXT};
pub use detail_overlay::{DetailOverlayProps, DetailOverlayView};
pub use filter_bar::{FilterBar, FilterBarProps};
pub use monster_screen::{MonsterScreen, MonsterScreenProps, ScreenLayout};
