#[cfg(test)]
mod tests {
    use super::super::search_service::*;
    use crate::backend::{LocalExportBackend, SearchBackend};
    use crate::chat_search::domain::models::{
        FoundMessages, PageRequest, PageToken, SearchSource,
    };
    use crate::chat_search::test_support::*;
    use std::sync::Arc;

    struct FailingBackend;

    impl SearchBackend for FailingBackend {
        fn search(&self, _request: &PageRequest) -> anyhow::Result<FoundMessages> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    fn create_request(generation: u64, token: PageToken) -> PageRequest {
        PageRequest {
            source: SearchSource::Primary,
            conversation: 1,
            generation,
            query: "hello".to_string(),
            from: None,
            token,
            limit: 2,
        }
    }

    #[test]
    fn test_response_carries_request_identity() {
        let store = create_store(create_matching_messages(3, "hello"), None);
        let service = SearchService::new(Arc::new(LocalExportBackend::new(Arc::new(store))));

        for generation in [1, 42, 999] {
            let response = service
                .search(&create_request(generation, PageToken::new("3")))
                .unwrap();
            assert_eq!(response.generation, generation);
            assert_eq!(response.token, PageToken::new("3"));
            assert_eq!(response.found.messages.len(), 2);
        }
    }

    #[test]
    fn test_backend_error_propagates_from_search() {
        let service = SearchService::new(Arc::new(FailingBackend));
        assert!(service.search(&create_request(1, PageToken::initial())).is_err());
    }

    #[test]
    fn test_backend_error_becomes_empty_page() {
        let service = SearchService::new(Arc::new(FailingBackend));

        let response = service.search_or_empty(&create_request(5, PageToken::initial()));

        assert_eq!(response.generation, 5);
        assert_eq!(response.found, FoundMessages::empty());
    }
}
