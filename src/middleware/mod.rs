pub mod guard;

pub use guard::{Navigation, Navigator, SessionWatch, SessionWatchHandle};
