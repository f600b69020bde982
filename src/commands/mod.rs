mod ensure;
mod user_info;

pub use ensure::{EnsureOptions, cmd_ensure};
pub use user_info::cmd_user_info;
