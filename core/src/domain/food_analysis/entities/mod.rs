pub mod errors;
pub mod food_analysis;
pub mod nutrition_info;

pub use errors::*;
pub use food_analysis::*;
pub use nutrition_info::*;
