pub mod anki;
pub mod cards;
pub mod health;
pub mod review;
