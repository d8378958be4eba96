pub mod image;
pub mod overlay;
pub mod parser;

pub use self::image::{ImageLoader, OrientationPolicy};
pub use overlay::ZoneOverlay;
pub use parser::MrzParser;
