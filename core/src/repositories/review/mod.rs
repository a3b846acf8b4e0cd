pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
mod memory;

pub use memory::InMemoryReviewRepository;
pub use r#trait::ReviewRepository;
