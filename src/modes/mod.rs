pub mod play;
pub mod sync;

pub use play::PlayMode;
pub use sync::SyncMode;
