//! Presentation boundary: raw form input in, awaitable results out.
//!
//! Every handler runs its database work on the blocking pool. Callers that
//! don't need the result can spawn the future and drop the handle.

mod catalog;
mod notes;
mod workout;

pub use catalog::{
    cmd_goal_set, cmd_master_add, cmd_master_remove, cmd_master_rename, MasterAddReq,
    MasterRenameReq,
};
pub use notes::{cmd_notes_load, cmd_notes_save, NotesSaveReq, NotesView};
pub use workout::{
    cmd_cardio_delete, cmd_cardio_edit, cmd_cardio_log, cmd_strength_delete, cmd_strength_edit,
    cmd_strength_log, CardioForm, StrengthForm,
};
