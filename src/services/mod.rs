pub mod aggregate;
pub mod board;
pub mod card;
pub mod positions;

pub use board::BoardService;
pub use card::CardService;
