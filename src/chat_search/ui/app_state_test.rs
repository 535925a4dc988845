#[cfg(test)]
mod tests {
    use super::super::app_state::*;
    use super::super::commands::Command;
    use super::super::events::Message;
    use crate::SearchOptions;
    use crate::chat_search::domain::models::{
        FoundMessages, Lifecycle, MessageRef, PageRequest, PageResponse, PageToken, PendingJump,
        SenderId,
    };
    use chrono::NaiveDate;
    use std::ops::Range;
    use std::time::Duration;

    fn create_test_state(migrated: bool, page_size: usize) -> AppState {
        let options = SearchOptions {
            page_size,
            ..SearchOptions::default()
        };
        AppState::new(1, migrated.then_some(2), true, &options)
    }

    fn fetches(command: &Command) -> Vec<PageRequest> {
        command
            .clone()
            .into_vec()
            .into_iter()
            .filter_map(|command| match command {
                Command::FetchPage(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn jumps(command: &Command) -> Vec<MessageRef> {
        command
            .clone()
            .into_vec()
            .into_iter()
            .filter_map(|command| match command {
                Command::JumpToMessage(target) => Some(target),
                _ => None,
            })
            .collect()
    }

    fn page(request: &PageRequest, ids: Range<i64>, total: usize, next: Option<&str>) -> Message {
        Message::PageLoaded(PageResponse::for_request(
            request,
            FoundMessages {
                messages: ids
                    .map(|id| MessageRef::new(request.conversation, id))
                    .collect(),
                total,
                next_token: next.map(PageToken::new),
            },
        ))
    }

    fn submit(state: &mut AppState, query: &str) -> Vec<PageRequest> {
        state.update(Message::QueryChanged(query.to_string()));
        fetches(&state.update(Message::SubmitQuery))
    }

    /// Three loaded results out of `total`, first one already jumped to
    fn create_loaded_state(page_size: usize, total: usize) -> AppState {
        let mut state = create_test_state(false, page_size);
        let requests = submit(&mut state, "alice");
        state.update(page(&requests[0], 1..4, total, Some("t1")));
        state
    }

    #[test]
    fn test_initial_state() {
        let state = create_test_state(false, 20);

        assert_eq!(state.mode, Mode::Search);
        assert_eq!(state.lifecycle, Lifecycle::Shown);
        assert_eq!(state.navigator.total(), None);
        assert_eq!(state.navigator.counter_text(), "");
        assert!(state.browser.is_empty());
        assert!(state.pending_jump.is_none());
        assert!(!state.ui.is_searching);
    }

    #[test]
    fn test_query_changed_schedules_search() {
        let mut state = create_test_state(false, 20);

        let command = state.update(Message::QueryChanged("alice".to_string()));

        assert_eq!(command, Command::ScheduleSearch(Duration::from_millis(300)));
        assert_eq!(state.ui.message, Some("[typing...]".to_string()));
        assert!(state.query.is_timer_armed());
    }

    #[test]
    fn test_timer_elapsed_starts_search() {
        let mut state = create_test_state(false, 20);
        state.update(Message::QueryChanged("alice".to_string()));

        let requests = fetches(&state.update(Message::SearchTimerElapsed));

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "alice");
        assert_eq!(requests[0].conversation, 1);
        assert!(requests[0].token.is_initial());
        assert!(state.ui.is_searching);
        assert_eq!(state.ui.message, Some("[searching...]".to_string()));
    }

    #[test]
    fn test_empty_query_is_never_submitted() {
        let mut state = create_test_state(true, 20);
        state.update(Message::QueryChanged(String::new()));

        assert_eq!(state.update(Message::SearchTimerElapsed), Command::None);
        assert_eq!(state.update(Message::SubmitQuery), Command::None);
        assert!(!state.ui.is_searching);
    }

    #[test]
    fn test_repeated_query_skips_debounce() {
        let mut state = create_test_state(false, 20);
        state.update(Message::QueryChanged("alice".to_string()));
        assert_eq!(fetches(&state.update(Message::SearchTimerElapsed)).len(), 1);

        state.update(Message::QueryChanged("alic".to_string()));
        let command = state.update(Message::QueryChanged("alice".to_string()));

        let requests = fetches(&command);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "alice");
        assert!(!state.query.is_timer_armed());
        assert_eq!(state.update(Message::SearchTimerElapsed), Command::None);
    }

    #[test]
    fn test_single_source_results_and_bounds() {
        let mut state = create_test_state(false, 20);
        let requests = submit(&mut state, "alice");

        let command = state.update(page(&requests[0], 1..4, 3, Some("t1")));

        assert_eq!(command, Command::JumpToMessage(MessageRef::new(1, 1)));
        assert_eq!(state.navigator.counter_text(), "1 of 3");
        assert_eq!(state.browser.len(), 3);
        assert!(!state.navigator.can_step_back());
        assert!(state.navigator.can_step_forward());
        assert!(!state.ui.is_searching);

        assert_eq!(
            state.update(Message::StepForward),
            Command::JumpToMessage(MessageRef::new(1, 2))
        );
        assert_eq!(
            state.update(Message::StepForward),
            Command::JumpToMessage(MessageRef::new(1, 3))
        );
        assert!(!state.navigator.can_step_forward());
        assert_eq!(state.update(Message::StepForward), Command::None);
        assert_eq!(state.navigator.counter_text(), "3 of 3");

        assert_eq!(
            state.update(Message::StepBack),
            Command::JumpToMessage(MessageRef::new(1, 2))
        );
    }

    #[test]
    fn test_migrated_results_fold_in_either_order() {
        for migrated_first in [true, false] {
            let mut state = create_test_state(true, 20);
            let requests = submit(&mut state, "deploy");
            assert_eq!(requests.len(), 2);
            let primary = page(&requests[0], 0..0, 0, Some("t1"));
            let migrated = page(&requests[1], 9..10, 1, Some("t1"));

            let (first, second) = if migrated_first {
                (migrated, primary)
            } else {
                (primary, migrated)
            };
            assert_eq!(state.update(first), Command::None);
            assert_eq!(state.navigator.total(), None);

            let command = state.update(second);

            assert_eq!(command, Command::JumpToMessage(MessageRef::new(2, 9)));
            assert_eq!(state.navigator.counter_text(), "1 of 1");
            assert!(state.merger.is_full());
            assert_eq!(state.browser.rows(), &[MessageRef::new(2, 9)]);
        }
    }

    #[test]
    fn test_jump_beyond_loaded_waits_for_page() {
        let mut state = create_loaded_state(3, 10);

        let command = state.update(Message::JumpToIndex(5));

        let requests = fetches(&command);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].token, PageToken::new("t1"));
        assert!(jumps(&command).is_empty());
        assert_eq!(
            state.pending_jump,
            Some(PendingJump {
                token: PageToken::new("t1"),
                index: 5,
            })
        );

        let command = state.update(page(&requests[0], 4..7, 10, Some("t2")));

        assert_eq!(jumps(&command), vec![MessageRef::new(1, 6)]);
        assert_eq!(state.pending_jump, None);
        assert_eq!(state.ui.focused_message, Some(MessageRef::new(1, 6)));
        assert_eq!(state.navigator.current(), 6);
        assert_eq!(state.browser.len(), 6);

        // The jump landed on the last loaded row, so the next page is prefetched
        let prefetch = fetches(&command);
        assert_eq!(prefetch.len(), 1);
        assert_eq!(prefetch[0].token, PageToken::new("t2"));

        let command = state.update(page(&prefetch[0], 7..10, 10, Some("t3")));
        assert!(jumps(&command).is_empty());
        assert_eq!(state.browser.len(), 9);
    }

    #[test]
    fn test_jump_is_clamped_to_total() {
        let mut state = create_loaded_state(3, 3);

        let command = state.update(Message::JumpToIndex(40));

        assert_eq!(command, Command::JumpToMessage(MessageRef::new(1, 3)));
        assert_eq!(state.navigator.current(), 3);
    }

    #[test]
    fn test_jump_before_search_is_ignored() {
        let mut state = create_test_state(false, 3);
        assert_eq!(state.update(Message::JumpToIndex(0)), Command::None);
    }

    #[test]
    fn test_new_search_supersedes_pending_and_stale_pages() {
        let mut state = create_loaded_state(3, 10);
        let command = state.update(Message::JumpToIndex(5));
        let stale_more = fetches(&command);

        let requests = submit(&mut state, "bob");
        assert!(state.pending_jump.is_none());

        assert_eq!(state.update(page(&stale_more[0], 4..7, 10, Some("t2"))), Command::None);
        assert_eq!(state.browser.len(), 3);

        let command = state.update(page(&requests[0], 20..22, 2, None));
        assert_eq!(command, Command::JumpToMessage(MessageRef::new(1, 20)));
        assert_eq!(state.navigator.counter_text(), "1 of 2");
        assert_eq!(state.browser.len(), 2);
    }

    #[test]
    fn test_no_results() {
        let mut state = create_test_state(false, 20);
        let requests = submit(&mut state, "nothing");

        let command = state.update(page(&requests[0], 0..0, 0, None));

        assert_eq!(command, Command::None);
        assert_eq!(state.navigator.counter_text(), "No results");
        assert_eq!(state.navigator.current(), 0);
        assert_eq!(state.ui.focused_message, None);

        assert_eq!(state.update(Message::ToggleList), Command::None);
        assert!(!state.browser.is_visible());
    }

    #[test]
    fn test_row_activation_resyncs_navigator() {
        let mut state = create_loaded_state(20, 3);

        state.update(Message::ToggleList);
        assert!(state.browser.is_visible());
        assert_eq!(state.browser.selected(), 0);

        // Everything is loaded, so reaching the end asks for nothing
        assert_eq!(state.update(Message::BrowserMove(2)), Command::None);
        let command = state.update(Message::BrowserActivate);

        assert_eq!(command, Command::JumpToMessage(MessageRef::new(1, 3)));
        assert_eq!(state.navigator.current(), 3);
        assert!(!state.browser.is_visible());

        let command = state.update(Message::BrowserRowActivated(MessageRef::new(1, 2)));
        assert_eq!(command, Command::JumpToMessage(MessageRef::new(1, 2)));
        assert_eq!(state.navigator.current(), 2);

        let unknown = state.update(Message::BrowserRowActivated(MessageRef::new(7, 7)));
        assert_eq!(unknown, Command::None);
    }

    #[test]
    fn test_browser_scroll_requests_more_once() {
        let mut state = create_loaded_state(3, 10);
        state.update(Message::ToggleList);

        let requests = fetches(&state.update(Message::BrowserMove(1)));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].token, PageToken::new("t1"));

        // Already in flight
        assert_eq!(state.update(Message::BrowserNeedMore), Command::None);

        state.update(page(&requests[0], 4..7, 10, Some("t2")));
        assert_eq!(state.browser.len(), 6);
        assert!(state.browser.is_visible());
    }

    #[test]
    fn test_toggle_list() {
        let mut state = create_loaded_state(20, 3);
        state.update(Message::StepForward);

        state.update(Message::ToggleList);
        assert!(state.browser.is_visible());
        assert_eq!(state.browser.selected(), 1);

        state.update(Message::ToggleList);
        assert!(!state.browser.is_visible());
    }

    #[test]
    fn test_query_change_collapses_browser() {
        let mut state = create_loaded_state(20, 3);
        state.update(Message::ToggleList);

        state.update(Message::QueryChanged("alice b".to_string()));

        assert!(!state.browser.is_visible());
    }

    #[test]
    fn test_sender_picker_flow() {
        let mut state = create_test_state(false, 20);

        assert_eq!(state.update(Message::ShowSenderPicker), Command::ShowSenderPicker(1));
        assert_eq!(state.mode, Mode::SenderPicker);

        let command = state.update(Message::SenderChosen(Some(SenderId::new("alice"))));
        assert_eq!(
            command,
            Command::Batch(vec![
                Command::ScheduleSearch(Duration::from_millis(300)),
                Command::FocusQuery,
            ])
        );
        assert_eq!(state.mode, Mode::Search);
        assert_eq!(state.query.chip_label(), Some("from: alice".to_string()));

        // One sender at a time, and no date jumps while filtering
        assert!(!state.can_choose_sender());
        assert_eq!(state.update(Message::ShowSenderPicker), Command::None);
        assert_eq!(state.update(Message::ShowCalendar), Command::None);

        let requests = fetches(&state.update(Message::SearchTimerElapsed));
        assert_eq!(requests[0].from, Some(SenderId::new("alice")));
        assert_eq!(requests[0].query, "");

        state.update(Message::SenderChosen(None));
        assert!(state.can_choose_sender());
    }

    #[test]
    fn test_sender_picker_needs_group_conversation() {
        let mut state = AppState::new(1, None, false, &SearchOptions::default());

        assert!(!state.can_choose_sender());
        assert_eq!(state.update(Message::ShowSenderPicker), Command::None);
        assert_eq!(state.mode, Mode::Search);
    }

    #[test]
    fn test_calendar_collapses_browser() {
        let mut state = create_loaded_state(20, 3);
        state.update(Message::ToggleList);

        assert_eq!(state.update(Message::ShowCalendar), Command::ShowCalendar(1));
        assert_eq!(state.mode, Mode::Calendar);
        assert!(!state.browser.is_visible());

        assert_eq!(state.update(Message::CloseDialog), Command::FocusQuery);
        assert_eq!(state.mode, Mode::Search);
    }

    #[test]
    fn test_date_chosen_jumps_conversation() {
        let mut state = create_test_state(false, 20);
        state.update(Message::ShowCalendar);

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let command = state.update(Message::DateChosen(date));

        assert_eq!(command, Command::JumpToDate(1, date));
        assert_eq!(state.mode, Mode::Search);
    }

    #[test]
    fn test_hide_animated_notifies_once() {
        let mut state = create_loaded_state(20, 3);

        assert_eq!(state.update(Message::HideAnimated), Command::NotifyDestroyed);
        assert_eq!(state.lifecycle, Lifecycle::Destroyed);

        assert_eq!(state.update(Message::HideAnimated), Command::None);
        assert_eq!(
            state.update(Message::QueryChanged("more".to_string())),
            Command::None
        );
    }

    #[test]
    fn test_status_messages() {
        let mut state = create_test_state(false, 20);

        state.update(Message::SetStatus("Copied".to_string()));
        assert_eq!(state.ui.message, Some("Copied".to_string()));

        state.update(Message::ClearStatus);
        assert_eq!(state.ui.message, None);
    }

    #[test]
    fn test_set_inner_focus() {
        let mut state = create_test_state(false, 20);
        assert_eq!(state.update(Message::SetInnerFocus), Command::FocusQuery);
        assert!(state.ui.query_focused);
    }
}
