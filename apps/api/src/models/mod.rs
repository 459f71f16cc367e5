// Wire types shared by the backend handlers and the terminal client.
// Field names follow the JSON the tool endpoints exchange, hence the renames.

pub mod career;
pub mod chat;
pub mod request;
pub mod resource;
pub mod roadmap;
