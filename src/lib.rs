pub mod app;
pub mod channel;
pub mod cli;
pub mod config;
pub mod error;
pub mod navigation;
pub mod page;
pub mod render;
pub mod search;
pub mod tracing;
pub mod types;

pub use app::{Command, Popup, Screen};
pub use channel::{DataChannel, Export, JsonChannel, MemoryChannel, ResourceFilter};
pub use config::{BrowseConfig, DisplayLimits};
pub use error::{FetchError, PageError};
pub use navigation::{LocationState, MemoryHistory, NavigationSearchCache, Navigator, Route, SearchSession};
pub use page::{BrowsePage, LoadState, PendingLoad};
pub use render::{PageBody, PageView};
pub use search::{Displayed, SearchFilterEngine, Searchable};
pub use types::{EntityKind, Resource, ResourceId, Tag, TagId};
