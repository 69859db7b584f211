mod license;
mod update;

pub use license::*;
pub use update::*;
