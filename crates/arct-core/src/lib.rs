//! Core of the arct build tasks: retrieving external resources into a project.

pub mod config;
pub mod destination;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod mode;
pub mod progress;
pub mod source;
pub mod template;
pub mod transport;

pub use error::{FetchError, TransferError};
pub use fetcher::{FetchRequest, FetchResult, Fetcher, Outcome};
pub use mode::FileMode;
pub use progress::{ConsoleSink, LogSink, Progress, ProgressSink, SilentSink};
pub use transport::{CurlTransport, Transport};
