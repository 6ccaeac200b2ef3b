mod circle;
mod triangle;

pub use circle::Circle;
pub use triangle::Triangle;
