#[cfg(test)]
mod tests {
    use super::super::{LocalExportBackend, SearchBackend};
    use crate::chat_search::domain::models::{PageRequest, PageToken, SearchSource, SenderId};
    use crate::chat_search::test_support::*;
    use std::sync::Arc;

    fn create_request(query: &str, from: Option<&str>, token: PageToken, limit: usize) -> PageRequest {
        PageRequest {
            source: SearchSource::Primary,
            conversation: 1,
            generation: 1,
            query: query.to_string(),
            from: from.map(SenderId::new),
            token,
            limit,
        }
    }

    fn create_backend() -> LocalExportBackend {
        let mut messages = create_matching_messages(7, "deploy");
        messages.push(create_message(8, "carol", "lunch?"));
        LocalExportBackend::new(Arc::new(create_store(messages, None)))
    }

    #[test]
    fn test_first_page_is_newest_first() {
        let backend = create_backend();

        let found = backend
            .search(&create_request("DEPLOY", None, PageToken::initial(), 3))
            .unwrap();

        let ids: Vec<i64> = found.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![7, 6, 5]);
        assert_eq!(found.total, 7);
        assert_eq!(found.next_token, Some(PageToken::new("5")));
    }

    #[test]
    fn test_continuation_and_exhaustion() {
        let backend = create_backend();

        let second = backend
            .search(&create_request("deploy", None, PageToken::new("5"), 3))
            .unwrap();
        let ids: Vec<i64> = second.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
        assert_eq!(second.total, 7);

        let last = backend
            .search(&create_request("deploy", None, PageToken::new("2"), 3))
            .unwrap();
        assert_eq!(last.messages.len(), 1);
        assert_eq!(last.next_token, None);
    }

    #[test]
    fn test_sender_filter() {
        let backend = create_backend();

        let found = backend
            .search(&create_request("deploy", Some("alice"), PageToken::initial(), 10))
            .unwrap();

        let ids: Vec<i64> = found.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![6, 4, 2]);
        assert_eq!(found.total, 3);
    }

    #[test]
    fn test_empty_query_with_sender_lists_their_messages() {
        let backend = create_backend();

        let found = backend
            .search(&create_request("", Some("carol"), PageToken::initial(), 10))
            .unwrap();

        assert_eq!(found.total, 1);
        assert_eq!(found.messages[0].id, 8);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let backend = create_backend();

        let found = backend
            .search(&create_request("lunch?", None, PageToken::initial(), 10))
            .unwrap();
        assert_eq!(found.total, 1);

        let found = backend
            .search(&create_request(".*", None, PageToken::initial(), 10))
            .unwrap();
        assert_eq!(found.total, 0);
    }

    #[test]
    fn test_invalid_token_is_an_error() {
        let backend = create_backend();
        let result = backend.search(&create_request("deploy", None, PageToken::new("abc"), 3));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_conversation_is_empty() {
        let backend = create_backend();
        let mut request = create_request("deploy", None, PageToken::initial(), 3);
        request.conversation = 42;

        let found = backend.search(&request).unwrap();
        assert_eq!(found.total, 0);
        assert!(found.messages.is_empty());
        assert_eq!(found.next_token, None);
    }
}
