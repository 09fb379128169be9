//! # Vexium Core
//!
//! Rendering core for the Vexium web front-end: the document shell every page
//! is wrapped in, and the need bars (food, water, sleep) it hosts. Rendering
//! is pure and synchronous; only settings touch the filesystem.
//!
//! ## Modules
//!
//! - `markup`: escaped HTML fragments and the `Render` trait
//! - `need`: need categories, glyphs and the `NeedBar` indicator
//! - `shell`: injectable document configuration and `DocumentShell`
//! - `page`: a panel of need bars inside the default shell
//! - `settings`: layered configuration (defaults, TOML, environment)
//! - `theme`: terminal colour palettes

pub mod error;
pub mod markup;
pub mod need;
pub mod page;
pub mod settings;
pub mod shell;
pub mod theme;

pub use error::{NeedError, SettingsError};
pub use markup::{Markup, Render};
pub use need::{NeedBar, NeedCategory};
pub use page::{render_page, NeedPanel};
pub use settings::Settings;
pub use shell::{AuthProvider, ContextProvider, DocumentShell, ShellConfig};
