// Job alert notifications.
// Email delivery goes through mail_client; this module decides who gets what.

pub mod auth;
pub mod email;
pub mod handlers;
pub mod templates;

pub use auth::FixedRecipient;
pub use email::EmailNotifier;
