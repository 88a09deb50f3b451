//! Routing core: resolve which resource services a request, then decide
//! local versus remote dispatch.
//!
//! Control flow: client request → [`resolve::resolve_resource_hierarchy`]
//! (replica view + resource tree) → hierarchy path →
//! [`redirect::resource_redirect`] (host/zone registry) → local execution
//! or a remote connection handle.

pub mod catalog;
pub mod error;
pub mod redirect;
pub mod resolve;
pub mod session;

pub use catalog::{Catalog, CatalogError, CollectionStat, MemoryCatalog};
pub use error::{Error, Result};
pub use redirect::{resource_redirect, Disposition, Redirect};
pub use resolve::resolve_resource_hierarchy;
pub use session::SessionContext;
