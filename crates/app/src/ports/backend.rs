//! Backend port — the remote REST API that owns every record.

use std::future::Future;
use std::sync::Arc;

use karmandia_domain::error::KarmandiaError;
use karmandia_domain::experience::{CreateReceipt, NewExperience};
use karmandia_domain::id::RecordId;
use karmandia_domain::resource::{Envelope, Resource, ResourceKind};
use karmandia_domain::session::Credentials;

/// Remote API holding experiences and contacts.
///
/// Implementations decide which calls carry the bearer token from
/// `credentials`; mutations always should.
pub trait BackendApi {
    /// Whether listing `kind` is authorised per caller.
    ///
    /// Such collections are never served to one caller from data fetched
    /// with another caller's credentials.
    fn list_requires_auth(&self, kind: ResourceKind) -> bool;

    /// Fetch the whole collection of `R`.
    fn list<R: Resource>(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Envelope<R>, KarmandiaError>> + Send;

    /// Delete one record of `kind`.
    fn delete(
        &self,
        kind: ResourceKind,
        id: &RecordId,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), KarmandiaError>> + Send;

    /// Upload a validated experience.
    fn create_experience(
        &self,
        experience: &NewExperience,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<CreateReceipt, KarmandiaError>> + Send;
}

impl<T: BackendApi + Send + Sync> BackendApi for Arc<T> {
    fn list_requires_auth(&self, kind: ResourceKind) -> bool {
        (**self).list_requires_auth(kind)
    }

    fn list<R: Resource>(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Envelope<R>, KarmandiaError>> + Send {
        (**self).list::<R>(credentials)
    }

    fn delete(
        &self,
        kind: ResourceKind,
        id: &RecordId,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), KarmandiaError>> + Send {
        (**self).delete(kind, id, credentials)
    }

    fn create_experience(
        &self,
        experience: &NewExperience,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<CreateReceipt, KarmandiaError>> + Send {
        (**self).create_experience(experience, credentials)
    }
}
