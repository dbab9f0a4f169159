mod ids;
mod operations;
mod types;
mod update;

pub use ids::UserIdGenerator;
pub use operations::{merge_patch, select_email_match};
pub use types::{NewUser, User, UserId, UserProfile};
pub use update::{UserField, UserUpdate};
