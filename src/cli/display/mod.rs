//! Display module for formatted CLI output

pub mod colors;
pub mod icons;
pub mod table;
pub mod view;

pub use colors::ColorTheme;
pub use icons::StatusIcon;
pub use table::TableRenderer;
pub use view::TerminalView;
