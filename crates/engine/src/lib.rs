#![forbid(unsafe_code)]

pub mod error;
pub mod ledger;
pub mod navigation;
pub mod progress;
pub mod run;
pub mod session;
pub mod timer;
pub mod view;
pub mod workflow;

pub use quiz_core::Clock;

pub use error::SessionError;
pub use ledger::AnswerLedger;
pub use navigation::{AdvanceOutcome, Navigator, ReviewFilter};
pub use progress::SessionProgress;
pub use run::{Run, RunBuilder};
pub use session::{AdvanceEffect, PendingAction, QuizSession, RunPhase, TickOutcome};
pub use timer::{RunTimer, TimerEvent};
pub use view::{
    DotState, NavigatorDot, OptionView, QuestionView, ResultsView, ScoreboardView, TimerView,
};
pub use workflow::{FlowState, LoadedSubject, QuizFlow};
