pub mod image_loader;
pub mod logger;
pub mod render;
pub mod shell;
