//! Reviews on completed transactions: one per reviewer and transaction,
//! editable and removable by their author only.

pub mod service;


pub use service::ReviewService;
