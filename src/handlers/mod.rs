pub mod affirmation;
mod entries;
pub mod gratitude;
pub mod health;
pub mod journal;
pub mod todo;
