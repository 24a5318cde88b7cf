//! Shape drawing and pointer interaction.

mod interaction;
mod renderer;
mod surface;

pub use interaction::*;
pub use renderer::*;
pub use surface::*;
