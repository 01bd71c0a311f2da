pub mod construction;
pub mod model;
pub mod serialization;

pub use construction::InstanceLoader;
pub use model::Instance;
pub use serialization::InstanceWriter;
