//! Reusable widget components.

pub mod cards;
pub mod detail;
pub mod form;
pub mod progress;
pub mod status;

pub use cards::{markup_spans, unescape_html, CardList};
pub use detail::DetailPanel;
pub use form::FormPanel;
pub use progress::ShareBar;
pub use status::StatusIndicator;
