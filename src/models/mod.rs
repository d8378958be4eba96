pub mod data;
pub mod image;
pub mod result;
pub mod rules;

pub use data::*;
pub use self::image::{DecodedImage, PixelLayout};
pub use result::{EngineResult, Line, RecognitionPayload, Zone};
pub use rules::{CheckDigitRule, CheckDigitRules};
