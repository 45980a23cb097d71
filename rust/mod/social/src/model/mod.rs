pub mod character;
pub mod comment;
pub mod notification;
pub mod post;
pub mod user;

pub use character::{Character, CreateCharacter};
pub use comment::{Comment, CreateComment};
pub use notification::{AddNotification, Notification};
pub use post::{CreatePost, Post};
pub use user::{CreateUser, User};
