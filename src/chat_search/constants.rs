//! Constants for the chat search module
//!
//! Timing, paging and layout values shared by the orchestrator and the hosts.

// Search
/// Messages requested per page from each source
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Delay between the last keystroke and the search it triggers
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Previously submitted (query, sender) pairs kept for instant re-emission
pub const TYPED_CACHE_LIMIT: usize = 32;

/// Rows from the end of the result list at which the next page is requested
pub const LOAD_MORE_THRESHOLD: usize = 3;

// Timing constants
/// Event polling interval in milliseconds
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// Status message auto-clear delay in milliseconds
pub const MESSAGE_CLEAR_DELAY_MS: u64 = 3000;

// Buffer sizes
/// Buffer size for file reading (32KB)
pub const FILE_READ_BUFFER_SIZE: usize = 32 * 1024;

// UI Layout constants
/// Height of the search bar component
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the pager bar component
pub const PAGER_BAR_HEIGHT: u16 = 1;

/// Height of the expanded result list
pub const RESULT_LIST_HEIGHT: u16 = 12;

/// Rows skipped by PageUp/PageDown in the result list
pub const LIST_PAGE_STEP: isize = 10;

/// Messages shown before and after the focused message in the conversation pane
pub const CONTEXT_MESSAGES: usize = 6;

/// Sender column width in list rows
pub const SENDER_COLUMN_WIDTH: u16 = 12;

/// Date column width in list rows (YYYY-MM-DD HH:MM)
pub const DATE_COLUMN_WIDTH: u16 = 16;

// Dialog dimensions
/// Maximum width for help and picker dialogs
pub const DIALOG_MAX_WIDTH: u16 = 60;

/// Minimum margin around dialogs
pub const DIALOG_MARGIN: u16 = 4;
