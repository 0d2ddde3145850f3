//! Presentation-layer session: tabs, form inputs, latest results, chat.

pub mod state;

pub use state::{
    Action, AppState, BlastField, BlastInputs, ChatMessage, ChatRole, Computed, FaceField,
    FaceInputs, OperationField, OperationInputs, Tab,
};
