//! Framescope playback crate: concrete frame sources and the cooperative
//! frame-rate driver that advances a [`framescope_core::Viewport`].

pub mod driver;
pub mod source;

pub use driver::Player;
pub use source::{DirectorySource, MemorySource};

/// Initialize logging for driver binaries and examples.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
