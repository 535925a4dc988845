use crate::chat_search::domain::models::{MessageRef, PageResponse, SenderId};
use chrono::NaiveDate;

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    // Query input
    QueryChanged(String),
    SubmitQuery,
    SearchTimerElapsed,
    SenderChosen(Option<SenderId>),

    // Search worker
    PageLoaded(PageResponse),

    // Pager
    StepForward,
    StepBack,
    JumpToIndex(usize),
    ToggleList,
    ShowCalendar,
    ShowSenderPicker,

    // Result list
    BrowserMove(isize),
    BrowserHome,
    BrowserEnd,
    BrowserActivate,
    BrowserRowActivated(MessageRef),
    BrowserNeedMore,

    // Dialogs
    DateChosen(NaiveDate),
    CloseDialog,
    ShowHelp,
    CloseHelp,

    // Lifecycle
    SetInnerFocus,
    HideAnimated,

    // UI events
    SetStatus(String),
    ClearStatus,
}
