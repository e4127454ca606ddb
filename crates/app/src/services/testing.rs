//! Recording in-memory backend shared by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use karmandia_domain::error::KarmandiaError;
use karmandia_domain::experience::{CreateReceipt, NewExperience};
use karmandia_domain::id::RecordId;
use karmandia_domain::resource::{Envelope, Resource, ResourceKind};
use karmandia_domain::session::Credentials;
use serde_json::Value;

use crate::ports::{BackendApi, SessionProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List {
        kind: ResourceKind,
        authenticated: bool,
    },
    Delete {
        kind: ResourceKind,
        id: RecordId,
    },
    Create {
        title: String,
        description: String,
        has_image: bool,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Status(u16),
    Transport(&'static str),
}

impl Failure {
    fn into_error(self) -> KarmandiaError {
        match self {
            Self::Status(status) => KarmandiaError::Rejected {
                status,
                message: None,
            },
            Self::Transport(text) => KarmandiaError::Transport(text.into()),
        }
    }
}

#[derive(Default)]
pub struct FakeBackend {
    records: Mutex<HashMap<ResourceKind, Vec<Value>>>,
    calls: Mutex<Vec<Call>>,
    fail_list: Mutex<Option<Failure>>,
    fail_delete: Mutex<Option<Failure>>,
    fail_create: Mutex<Option<Failure>>,
    create_message: Mutex<Option<String>>,
}

impl FakeBackend {
    pub fn with_records(kind: ResourceKind, records: Vec<Value>) -> Self {
        let backend = Self::default();
        backend.records.lock().unwrap().insert(kind, records);
        backend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self, kind: ResourceKind) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::List { kind: k, .. } if *k == kind))
            .count()
    }

    pub fn fail_list(&self, failure: Option<Failure>) {
        *self.fail_list.lock().unwrap() = failure;
    }

    pub fn fail_delete(&self, failure: Option<Failure>) {
        *self.fail_delete.lock().unwrap() = failure;
    }

    pub fn fail_create(&self, failure: Option<Failure>) {
        *self.fail_create.lock().unwrap() = failure;
    }

    pub fn set_create_message(&self, message: Option<&str>) {
        *self.create_message.lock().unwrap() = message.map(str::to_string);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl BackendApi for FakeBackend {
    fn list_requires_auth(&self, kind: ResourceKind) -> bool {
        kind == ResourceKind::Contact
    }

    async fn list<R: Resource>(
        &self,
        credentials: &Credentials,
    ) -> Result<Envelope<R>, KarmandiaError> {
        self.record(Call::List {
            kind: R::KIND,
            authenticated: credentials.is_authenticated(),
        });
        if let Some(failure) = *self.fail_list.lock().unwrap() {
            return Err(failure.into_error());
        }
        let records = self
            .records
            .lock()
            .unwrap()
            .get(&R::KIND)
            .cloned()
            .unwrap_or_default();
        let data = serde_json::from_value(Value::Array(records))
            .map_err(|err| KarmandiaError::Decode(Box::new(err)))?;
        Ok(Envelope {
            success: true,
            message: String::new(),
            data,
        })
    }

    async fn delete(
        &self,
        kind: ResourceKind,
        id: &RecordId,
        _credentials: &Credentials,
    ) -> Result<(), KarmandiaError> {
        self.record(Call::Delete {
            kind,
            id: id.clone(),
        });
        if let Some(failure) = *self.fail_delete.lock().unwrap() {
            return Err(failure.into_error());
        }
        let mut records = self.records.lock().unwrap();
        if let Some(list) = records.get_mut(&kind) {
            list.retain(|record| record["_id"] != id.as_str());
        }
        Ok(())
    }

    async fn create_experience(
        &self,
        experience: &NewExperience,
        _credentials: &Credentials,
    ) -> Result<CreateReceipt, KarmandiaError> {
        self.record(Call::Create {
            title: experience.title().to_string(),
            description: experience.description().to_string(),
            has_image: experience.image().is_some(),
        });
        if let Some(failure) = *self.fail_create.lock().unwrap() {
            return Err(failure.into_error());
        }
        Ok(CreateReceipt {
            message: self.create_message.lock().unwrap().clone(),
        })
    }
}

#[derive(Default)]
pub struct FakeSessionProvider {
    pub sign_outs: Mutex<usize>,
    pub fail: bool,
}

impl SessionProvider for FakeSessionProvider {
    async fn sign_out(&self, _credentials: &Credentials) -> Result<(), KarmandiaError> {
        *self.sign_outs.lock().unwrap() += 1;
        if self.fail {
            Err(KarmandiaError::Transport("provider down".into()))
        } else {
            Ok(())
        }
    }
}

pub fn experience_json(id: &str, title: &str) -> Value {
    serde_json::json!({
        "_id": id,
        "title": title,
        "desccription": "<p>A long enough description</p>",
        "image": {"url": "https://cdn.example/img.jpg", "public_id": "img"},
        "__v": 0
    })
}

pub fn contact_json(id: &str, name: &str) -> Value {
    serde_json::json!({
        "_id": id,
        "name": name,
        "email": format!("{name}@example.com"),
        "homeBase": "Porto",
        "instagram": "@someone",
        "description": "Looking for a week in May"
    })
}
