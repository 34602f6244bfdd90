//! egui views.
//!
//! - `login` / `dashboard`: the two pages
//! - `switchers`: language and theme buttons shared by both pages
//! - `menu`: renders the menu the host installed
//! - `devtools`: diagnostics window behind "Toggle Developer Tools"
//! - `theme`: light/dark palettes and the shared style

pub mod dashboard;
pub mod devtools;
pub mod login;
pub mod menu;
pub mod switchers;
pub mod theme;

pub use login::LoginForm;
pub use menu::WindowMenu;
pub use switchers::SwitcherAction;
