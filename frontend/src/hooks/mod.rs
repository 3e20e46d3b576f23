pub mod use_booking_editor;
pub mod use_load;
pub mod use_resources;
pub mod use_session;
pub mod use_submit_guard;

pub use use_booking_editor::{use_booking_editor, BookingEditorActions};
pub use use_load::LoadState;
pub use use_resources::*;
pub use use_session::use_session;
pub use use_submit_guard::use_submit_guard;
