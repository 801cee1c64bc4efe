pub mod composite;
pub mod input;
pub mod mode;
pub mod model;
pub mod render;
pub mod session;
pub mod settings;
pub mod settings_store;
pub mod store;
pub mod transform;

pub use session::FogSession;
pub use store::{FileStorage, KeyValueStorage, MemoryStorage};
