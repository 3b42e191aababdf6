//! Dashboard session state.
//!
//! Interaction state lives in one explicit value passed through pure
//! handlers; the fetch/aggregate pipeline below it stays stateless. The
//! presentation layer owns the state and feeds it back on each interaction.

use chrono::NaiveDate;

/// Which derived view the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    #[default]
    Records,
    DailyTotals,
    CategoryTotals,
    Pivot,
}

/// Selected range, category filter and view of one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub category: Option<String>,
    pub view: ViewKind,
}

impl DashboardState {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            category: None,
            view: ViewKind::default(),
        }
    }
}

/// One dashboard interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// Pick a new date range. Validity (start <= end) is enforced by the
    /// range fetch, not here; the selection itself is always recorded.
    SelectRange { start: NaiveDate, end: NaiveDate },
    SetCategory(String),
    ClearCategory,
    SelectView(ViewKind),
}

/// Apply one interaction, returning the next state. Total: every action on
/// every state produces a state.
pub fn apply(state: DashboardState, action: DashboardAction) -> DashboardState {
    match action {
        DashboardAction::SelectRange { start, end } => DashboardState {
            start,
            end,
            ..state
        },
        DashboardAction::SetCategory(label) => DashboardState {
            category: Some(label),
            ..state
        },
        DashboardAction::ClearCategory => DashboardState {
            category: None,
            ..state
        },
        DashboardAction::SelectView(view) => DashboardState { view, ..state },
    }
}
