pub mod fallback;
pub mod health;
pub mod invitation;
pub mod rsvp;
