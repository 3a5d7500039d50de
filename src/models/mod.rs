pub mod contour;
pub mod pitch;
pub mod utterance;

pub use contour::*;
pub use pitch::*;
pub use utterance::*;
