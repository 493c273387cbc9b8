pub mod health;
pub mod team;
pub mod tournament;
pub mod user;
pub mod validation;
