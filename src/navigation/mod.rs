//! Navigation: routes, the router interface and per-path search memory.

pub(crate) mod cache;
pub(crate) mod history;
pub(crate) mod route;
pub(crate) mod session;

pub use cache::NavigationSearchCache;
pub use history::{LocationState, MemoryHistory, Navigator};
pub use route::Route;
pub use session::SearchSession;
