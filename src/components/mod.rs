//! UI Components
//!
//! Reusable Leptos components.

mod header;
mod create_form;
mod todo_item;
mod todo_list;
mod module_banner;
mod toaster;

pub use header::Header;
pub use create_form::CreateForm;
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
pub use module_banner::ModuleBanner;
pub use toaster::Toaster;
