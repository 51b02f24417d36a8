pub mod external;
pub mod fleet;
pub mod floor;
pub mod internal;
pub mod registry;

pub use external::ExternalDispatcher;
pub use fleet::Fleet;
pub use floor::{CarButtons, Floor};
pub use internal::InternalDispatcher;
pub use registry::Registry;
