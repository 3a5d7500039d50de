pub mod input;
pub mod labels;
pub mod output;
pub mod track;

pub use input::*;
pub use labels::*;
pub use output::*;
pub use track::*;
