pub mod board;
pub mod card;
pub mod comment;
pub mod list;
pub mod tag;
pub mod user;
pub mod view;

pub use board::*;
pub use card::*;
pub use comment::*;
pub use list::*;
pub use tag::*;
pub use user::*;
pub use view::*;
