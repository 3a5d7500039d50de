pub mod stage0_smooth;
pub mod stage1_normalize;
pub mod stage2_stylise;
pub mod stage3_render;

pub use stage0_smooth::*;
pub use stage1_normalize::*;
pub use stage2_stylise::*;
pub use stage3_render::*;
