pub mod input;
pub mod screen;
pub mod sound;

pub use screen::Screen;
pub use sound::Sound;
