pub mod conversation_store;
pub mod messages_search;
pub mod navigator;
pub mod query_input;
pub mod result_browser;
pub mod result_merger;
pub mod search_service;

#[cfg(test)]
mod search_service_test;
