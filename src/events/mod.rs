pub mod keyboard;
pub mod keys;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::{client_pos, PointerListeners, WindowListener};
