//! Browser-side behaviour of the FAQ front end, usable from any Rust caller:
//! filtering and search over fetched records, tag editing, bulk import
//! parsing, rendering, and a typed client over HTTP or an in-process router.

pub mod api;
pub mod bulk;
pub mod filter;
pub mod render;
pub mod session;
pub mod tags;

pub use api::{FaqClient, HttpTransport, LocalTransport, Transport};
pub use filter::{Facets, FilterKind, FilterState, apply_filters_and_search};
pub use session::{ClientSession, Notice, NoticeKind};
pub use tags::{FaqDraft, TagEditor};
