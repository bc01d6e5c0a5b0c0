/// Schema path inventory command.
pub mod paths;
/// Dynamic tree print command.
pub mod show;

pub(crate) mod util;
