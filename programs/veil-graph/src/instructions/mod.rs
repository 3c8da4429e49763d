pub mod follow;
pub mod queries;
pub mod unfollow;
