//! Application layer: navigation, pagination and catalog services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod assets;
pub mod error;
pub mod error_ext;
pub mod labels;
pub mod navigation;
pub mod pagination;
pub mod services;
pub mod session;

pub use assets::{AssetCatalog, BitmapCache, CancelFlag, PreloadOutcome, PreloadProgress, Preloader};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use labels::LabelConfig;
pub use navigation::{Entry, EntryKind, Navigator};
pub use pagination::{Carousel, DEFAULT_PAGE_SIZE};
pub use session::{ExplorerSession, View};
