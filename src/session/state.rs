//! Application state for the presentation layer.
//!
//! `AppState` is mutated only through [`AppState::apply`]. Every input
//! change recomputes the affected result at once; nothing here is
//! persisted, and the physics engine never sees this struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::physics_engine::{
    compute_blast_pattern, compute_face_pattern, compute_operation_cost, EstimateError,
};
use crate::types::{FaceGeometry, FieldValue, OperationCostSummary, PatternResult, RockClass};

/// Cap on retained chat turns (user + assistant) for display.
pub const MAX_CHAT_MESSAGES: usize = 200;

// ============================================================================
// Tabs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Home,
    Face,
    Blast,
    Operation,
    Assistant,
    Reviews,
    Training,
}

// ============================================================================
// Inputs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceInputs {
    pub width: f64,
    pub height: f64,
    pub advance: f64,
    pub rock_class: RockClass,
}

impl Default for FaceInputs {
    fn default() -> Self {
        Self {
            width: 3.5,
            height: 3.5,
            advance: 3.0,
            rock_class: RockClass::Medium,
        }
    }
}

impl FaceInputs {
    pub const fn geometry(&self) -> FaceGeometry {
        FaceGeometry::new(self.width, self.height, self.advance)
    }

    pub fn compute(&self) -> Result<PatternResult, EstimateError> {
        compute_face_pattern(self.width, self.height, self.advance, self.rock_class)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastInputs {
    pub spacing: f64,
    pub burden: f64,
    pub width: f64,
    pub height: f64,
    pub advance: f64,
}

impl Default for BlastInputs {
    fn default() -> Self {
        Self {
            spacing: 1.1,
            burden: 1.0,
            width: 3.5,
            height: 3.5,
            advance: 3.0,
        }
    }
}

impl BlastInputs {
    pub fn compute(&self) -> Result<PatternResult, EstimateError> {
        compute_blast_pattern(
            self.spacing,
            self.burden,
            self.width,
            self.height,
            self.advance,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationInputs {
    pub advance: f64,
    pub hole_count: u64,
    pub hole_length: f64,
    pub unit_price: f64,
}

impl Default for OperationInputs {
    fn default() -> Self {
        Self {
            advance: 3.0,
            hole_count: 40,
            hole_length: 3.2,
            unit_price: 15.0,
        }
    }
}

impl OperationInputs {
    pub fn compute(&self) -> Result<OperationCostSummary, EstimateError> {
        compute_operation_cost(
            self.advance,
            self.hole_count,
            self.hole_length,
            self.unit_price,
        )
    }
}

/// Result slot: the latest value or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Computed<T> {
    Ready { value: T },
    Invalid { reason: String },
}

impl<T> Computed<T> {
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready { value } => Some(value),
            Self::Invalid { .. } => None,
        }
    }
}

impl<T> From<Result<T, EstimateError>> for Computed<T> {
    fn from(r: Result<T, EstimateError>) -> Self {
        match r {
            Ok(value) => Self::Ready { value },
            Err(e) => Self::Invalid {
                reason: e.to_string(),
            },
        }
    }
}

// ============================================================================
// Field Names
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceField {
    Width,
    Height,
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlastField {
    Spacing,
    Burden,
    Width,
    Height,
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationField {
    Advance,
    HoleCount,
    HoleLength,
    UnitPrice,
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

// ============================================================================
// Actions
// ============================================================================

/// Every state transition the presentation layer can request.
///
/// The advisory variants are raised by the server around backend calls
/// and cannot be deserialized from client JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SelectTab { tab: Tab },
    SetFaceField { field: FaceField, value: FieldValue },
    SetFaceRock { rock_class: RockClass },
    SetBlastField { field: BlastField, value: FieldValue },
    SetOperationField { field: OperationField, value: FieldValue },
    #[serde(skip_deserializing)]
    AnalysisStarted,
    /// `inputs` are the face inputs the analysis was requested for.
    #[serde(skip_deserializing)]
    AnalysisFinished { inputs: FaceInputs, text: String },
    #[serde(skip_deserializing)]
    ChatSent { text: String },
    #[serde(skip_deserializing)]
    ChatAnswered { text: String },
    ClearChat,
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub active_tab: Tab,

    pub face_inputs: FaceInputs,
    pub face_result: Computed<PatternResult>,
    /// Latest narrative analysis for the face design
    pub face_analysis: Option<String>,
    pub analysis_loading: bool,

    pub blast_inputs: BlastInputs,
    pub blast_result: Computed<PatternResult>,

    pub operation_inputs: OperationInputs,
    pub operation_result: Computed<OperationCostSummary>,

    pub chat: Vec<ChatMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        let face_inputs = FaceInputs::default();
        let blast_inputs = BlastInputs::default();
        let operation_inputs = OperationInputs::default();
        Self {
            active_tab: Tab::default(),
            face_result: face_inputs.compute().into(),
            face_inputs,
            face_analysis: None,
            analysis_loading: false,
            blast_result: blast_inputs.compute().into(),
            blast_inputs,
            operation_result: operation_inputs.compute().into(),
            operation_inputs,
            chat: Vec::new(),
        }
    }
}

impl AppState {
    /// Apply one action. Returns `false` when the action was ignored.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SelectTab { tab } => self.active_tab = tab,
            Action::SetFaceField { field, value } => {
                let v = value.as_f64();
                match field {
                    FaceField::Width => self.face_inputs.width = v,
                    FaceField::Height => self.face_inputs.height = v,
                    FaceField::Advance => self.face_inputs.advance = v,
                }
                self.recompute_face();
            }
            Action::SetFaceRock { rock_class } => {
                self.face_inputs.rock_class = rock_class;
                self.recompute_face();
            }
            Action::SetBlastField { field, value } => {
                let v = value.as_f64();
                let b = &mut self.blast_inputs;
                match field {
                    BlastField::Spacing => b.spacing = v,
                    BlastField::Burden => b.burden = v,
                    BlastField::Width => b.width = v,
                    BlastField::Height => b.height = v,
                    BlastField::Advance => b.advance = v,
                }
                self.blast_result = self.blast_inputs.compute().into();
            }
            Action::SetOperationField { field, value } => {
                let o = &mut self.operation_inputs;
                match field {
                    OperationField::Advance => o.advance = value.as_f64(),
                    OperationField::HoleCount => o.hole_count = value.as_count(),
                    OperationField::HoleLength => o.hole_length = value.as_f64(),
                    OperationField::UnitPrice => o.unit_price = value.as_f64(),
                }
                self.operation_result = self.operation_inputs.compute().into();
            }
            Action::AnalysisStarted => {
                if self.face_result.value().is_none() {
                    return false;
                }
                self.analysis_loading = true;
            }
            Action::AnalysisFinished { inputs, text } => {
                self.analysis_loading = false;
                if inputs != self.face_inputs {
                    return false;
                }
                self.face_analysis = Some(text);
            }
            Action::ChatSent { text } => {
                let text = text.trim();
                if text.is_empty() {
                    return false;
                }
                self.push_chat(ChatRole::User, text.to_string());
            }
            Action::ChatAnswered { text } => self.push_chat(ChatRole::Assistant, text),
            Action::ClearChat => self.chat.clear(),
        }
        true
    }

    fn recompute_face(&mut self) {
        self.face_result = self.face_inputs.compute().into();
        // The stored analysis described the previous inputs
        self.face_analysis = None;
    }

    fn push_chat(&mut self, role: ChatRole, text: String) {
        if self.chat.len() >= MAX_CHAT_MESSAGES {
            self.chat.remove(0);
        }
        self.chat.push(ChatMessage {
            role,
            text,
            at: Utc::now(),
        });
    }
}
