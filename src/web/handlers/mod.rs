//! Page handlers. Each renders an askama template or redirects.

mod account;
mod health;
mod home;
mod links;
mod profile;

pub use account::{login_page, login_submit, logout_handler, register_page, register_submit};
pub use health::health_handler;
pub use home::home_handler;
pub use links::{
    add_link_submit, delete_link_handler, edit_link_page, edit_link_submit, manage_links_page,
};
pub use profile::profile_handler;
