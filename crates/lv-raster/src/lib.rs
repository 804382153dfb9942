/// Character-to-intensity rasterization for levelmap.

pub mod intensity;
pub mod rasterizer;

pub use intensity::IntensityLut;
pub use rasterizer::Rasterizer;
