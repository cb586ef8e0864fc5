//! # TUI Components
//!
//! Everything that paints a part of the screen.
//!
//! ## Props-Based Painting
//!
//! Components receive what they show as struct fields, borrowed for a single
//! render pass, instead of reaching into global state:
//!
//! ```rust,ignore
//! StatusLine { state: &session, boot_message: "Booting", theme }
//!     .paint(surface, layout.prompt);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── logo.rs         (pixel-grid logo, top rows)
//! ├── status_line.rs  (boot message / graph hint / prompt)
//! ├── log_view.rs     (content renderer: scrolling log)
//! └── graph_view.rs   (content renderer: bar chart)
//! ```

pub mod graph_view;
pub mod log_view;
pub mod logo;
pub mod status_line;

pub use graph_view::GraphView;
pub use log_view::LogView;
pub use logo::Logo;
pub use status_line::StatusLine;
