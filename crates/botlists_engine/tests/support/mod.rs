#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use botlists_core::{MembersResponse, RawAccount};
use botlists_engine::{
    ApiError, FailureKind, LinkResolver, ListMembersApi, MembersQuery, ResolveError,
};
use serde_json::Value;

pub fn init_logging() {
    botlists_logging::initialize_for_tests();
}

pub fn account(handle: &str, description: &str) -> RawAccount {
    RawAccount {
        id_str: format!("id-{handle}"),
        name: handle.to_uppercase(),
        screen_name: handle.to_string(),
        description: description.to_string(),
        created_at: "Sat Mar 01 12:00:00 +0000 2014".to_string(),
        ..RawAccount::default()
    }
}

pub fn members(accounts: Vec<RawAccount>) -> MembersResponse {
    MembersResponse {
        users: accounts,
        ..MembersResponse::default()
    }
}

/// Serves canned responses keyed by `owner/lists/slug` and records every call.
#[derive(Default)]
pub struct FakeApi {
    responses: HashMap<String, Result<Value, ApiError>>,
    calls: Mutex<Vec<MembersQuery>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, list: &str, response: MembersResponse) -> Self {
        let body = serde_json::to_value(response).unwrap();
        self.with_raw_list(list, body)
    }

    /// Serves `body` verbatim, including fields the model does not read.
    pub fn with_raw_list(mut self, list: &str, body: Value) -> Self {
        self.responses.insert(list.to_string(), Ok(body));
        self
    }

    pub fn with_failure(mut self, list: &str, err: ApiError) -> Self {
        self.responses.insert(list.to_string(), Err(err));
        self
    }

    pub fn calls(&self) -> Vec<MembersQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ListMembersApi for FakeApi {
    async fn list_members(&self, query: &MembersQuery) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(query.clone());
        self.responses
            .get(&query.list.to_string())
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    status: 404,
                    message: "no such list".to_string(),
                })
            })
    }
}

/// Maps known URLs to destinations; anything else fails to resolve.
#[derive(Default)]
pub struct FakeResolver {
    targets: HashMap<String, String>,
}

impl FakeResolver {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            targets: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl LinkResolver for FakeResolver {
    async fn expand(&self, url: &str) -> Result<String, ResolveError> {
        self.targets.get(url).cloned().ok_or_else(|| ResolveError {
            kind: FailureKind::Network,
            message: format!("cannot reach {url}"),
        })
    }
}
