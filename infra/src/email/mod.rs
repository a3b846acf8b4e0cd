//! OTP delivery channels implementing the core `Notifier` trait

pub mod console;
pub mod smtp;


pub use console::{ConsoleNotifier, DeliveredMessage};
pub use smtp::SmtpNotifier;
