mod enums;
mod params;
mod primitives;

// Re-export all types
pub use enums::*;
pub use params::*;
pub use primitives::*;
