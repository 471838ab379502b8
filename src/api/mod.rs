//! API service modules for Graph API node types.
//!
//! Each service wraps the requests for one kind of node and decodes the
//! response into its model.

mod pages;
mod users;

pub use pages::PagesService;
pub use users::UsersService;
