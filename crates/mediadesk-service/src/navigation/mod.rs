//! Breadcrumb navigation and browsing sessions.

pub mod navigator;
pub mod sequence;
pub mod session;

pub use navigator::Navigator;
pub use sequence::{RequestSequencer, RequestTicket};
pub use session::BrowserSession;
