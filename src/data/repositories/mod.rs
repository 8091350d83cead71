pub mod card;
pub mod user;

pub use card::CardRepository;
pub use user::UserRepository;
