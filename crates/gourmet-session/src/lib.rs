//! Restaurant-search session: state machine, async driver, pagination
//! window, bookmark persistence, and geolocation.

pub mod bookmarks;
pub mod geolocation;
pub mod machine;
pub mod pagination;
pub mod session;
pub mod state;

pub use bookmarks::{BookmarkError, BookmarkStore, Bookmarks, JsonFileStore, STORAGE_KEY};
pub use geolocation::{locate_with_timeout, FixedLocator, GeolocationError, Locator};
pub use machine::{FetchTicket, SearchMachine};
pub use pagination::{page_window, total_pages, PageWindow};
pub use session::{SearchSession, ShopSource};
pub use state::{RequestStatus, SessionMode, SessionState};
