mod auth;
pub use auth::{Login, Register};

mod notes;
pub use notes::{EditNote, NewNote, Notes};

mod settings;
pub use settings::{Categories, Profile};
