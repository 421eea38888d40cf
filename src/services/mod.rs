// Request orchestration between the routes, the game engine and the store

pub mod games;
pub mod users;
