pub mod emoji;
pub mod interactive;
pub mod message;
