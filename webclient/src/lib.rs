// exported modules
pub mod error;
pub mod model;

// client impls
pub mod boj;

// re-exports
pub use boj::BojClient;
pub use error::*;
pub use model::*;

pub fn new_client(source: Source) -> Box<dyn Client> {
    use Source::*;
    match source {
        Boj => Box::new(BojClient::new()),
    }
}

// internal modules
mod util;
