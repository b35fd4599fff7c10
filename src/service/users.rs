//! User accounts and identity resolution.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument};

use super::{AuthPolicy, FileRepository, NoteBook, record_call};
use crate::store::UserStore;
use crate::stream::{self, RecordStream};
use crate::types::{AuthRequest, PaymentId, TargetId, User, UserId};
use crate::{Result, RusveError};

const SERVICE: &str = "UsersService";

/// Account operations over a [`UserStore`].
///
/// Holds the file repository and note book of the same deployment so that
/// deleting a user can apply the ownership policy to what the user owns.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
    files: FileRepository,
    notes: NoteBook,
    auth: AuthPolicy,
    stream_buffer: usize,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserStore>, files: FileRepository, notes: NoteBook) -> Self {
        Self {
            store,
            files,
            notes,
            auth: AuthPolicy::default(),
            stream_buffer: stream::DEFAULT_STREAM_BUFFER,
        }
    }

    pub fn with_auth_policy(mut self, auth: AuthPolicy) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_stream_buffer(mut self, size: usize) -> Self {
        self.stream_buffer = size;
        self
    }

    /// Resolve the user behind an identity claim.
    ///
    /// A known subject refreshes the user's `updated` time. An unknown one is
    /// provisioned as a plain user, or rejected with `NotFound` when
    /// provisioning is off. A deleted account is `Unauthenticated`. Calling
    /// this twice with the same subject yields the same user.
    #[instrument(skip(self, request), fields(sub = %request.sub))]
    pub async fn auth(&self, request: &AuthRequest) -> Result<User> {
        let start = Instant::now();
        let outcome = self.resolve(request).await;
        record_call(SERVICE, "Auth", start, &outcome);
        outcome
    }

    async fn resolve(&self, request: &AuthRequest) -> Result<User> {
        if request.sub.is_empty() {
            return Err(RusveError::InvalidArgument("subject is required".into()));
        }
        if let Some(found) = self.store.find_by_subject(&request.sub).await? {
            return self.refresh(found).await;
        }
        if !self.auth.provision {
            return Err(RusveError::NotFound(format!(
                "no user for subject {}",
                request.sub
            )));
        }
        let user = User::provision(request.sub.clone(), request.email.clone());
        match self.store.insert_user(user.clone()).await {
            Ok(()) => {
                info!(user = %user.id, "user provisioned");
                Ok(user)
            }
            // Lost a race against a concurrent first login of the same subject.
            Err(RusveError::AlreadyExists(_)) => {
                let found = self
                    .store
                    .find_by_subject(&request.sub)
                    .await?
                    .ok_or_else(|| RusveError::Storage("subject index out of sync".into()))?;
                self.refresh(found).await
            }
            Err(e) => Err(e),
        }
    }

    /// Bump the update time of an existing account in place.
    async fn refresh(&self, found: User) -> Result<User> {
        if found.is_deleted() {
            return Err(RusveError::Unauthenticated);
        }
        // `None` here means the account was deleted after the lookup.
        self.store
            .touch_user(&found.id)
            .await?
            .ok_or(RusveError::Unauthenticated)
    }

    /// Stream the users for `ids` in request order.
    ///
    /// Repeated ids are sent once. Unknown and deleted ids are skipped.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn get_users(&self, ids: Vec<UserId>) -> Result<RecordStream<User>> {
        let start = Instant::now();
        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<UserId> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        let inner = self.store.get_users(unique);
        record_call::<()>(SERVICE, "GetUsers", start, &Ok(()));
        Ok(stream::bounded_stream(
            stream::counted(inner, SERVICE, "GetUsers"),
            self.stream_buffer,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        let start = Instant::now();
        let outcome = self.store.get_user(id).await.and_then(|found| {
            live(found).ok_or_else(|| RusveError::NotFound(format!("user {id}")))
        });
        record_call(SERVICE, "GetUser", start, &outcome);
        outcome
    }

    /// Replace the mutable fields of a user and return the stored record.
    ///
    /// Email, name, role, avatar and payment id are taken from `user`. The id,
    /// subject and creation time of the stored record are kept.
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn update_user(&self, user: User) -> Result<User> {
        let start = Instant::now();
        let outcome = self.replace(user).await;
        record_call(SERVICE, "UpdateUser", start, &outcome);
        outcome
    }

    async fn replace(&self, user: User) -> Result<User> {
        user.validate_for_update()?;
        let current = live(self.store.get_user(&user.id).await?)
            .ok_or_else(|| RusveError::NotFound(format!("user {}", user.id)))?;
        let updated = User {
            id: current.id,
            created: current.created,
            updated: Utc::now(),
            sub: current.sub,
            email: user.email,
            role: user.role,
            name: user.name,
            avatar_id: user.avatar_id.filter(|id| !id.is_empty()),
            payment_id: user.payment_id,
            deleted: None,
        };
        self.store.replace_user(updated.clone()).await?;
        Ok(updated)
    }

    /// Overwrite the payment id of a user. No format validation is applied.
    #[instrument(skip(self, payment_id))]
    pub async fn update_payment_id(&self, user_id: &UserId, payment_id: PaymentId) -> Result<()> {
        let start = Instant::now();
        let outcome = self.store.set_payment_id(user_id, payment_id).await;
        record_call(SERVICE, "UpdatePaymentId", start, &outcome);
        outcome
    }

    /// Delete a user together with the files of the user's target and the
    /// user's notes, subject to the ownership policy.
    ///
    /// The account itself is marked deleted rather than removed, so its
    /// subject cannot be provisioned again.
    ///
    /// Under [`OwnershipPolicy::Refuse`](super::OwnershipPolicy::Refuse) the
    /// call fails with `FailedPrecondition` and nothing is removed while
    /// either children set is non-empty.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &UserId) -> Result<User> {
        let start = Instant::now();
        let outcome = self.remove(id).await;
        record_call(SERVICE, "DeleteUser", start, &outcome);
        outcome
    }

    async fn remove(&self, id: &UserId) -> Result<User> {
        if live(self.store.get_user(id).await?).is_none() {
            return Err(RusveError::NotFound(format!("user {id}")));
        }
        let files = self.files.delete_target(&TargetId::from(id)).await?;
        let notes = self.notes.delete_user_notes(id).await?;
        let user = self
            .store
            .delete_user(id)
            .await?
            .ok_or_else(|| RusveError::NotFound(format!("user {id}")))?;
        info!(files, notes, "user deleted");
        Ok(user)
    }
}

fn live(user: Option<User>) -> Option<User> {
    user.filter(|user| !user.is_deleted())
}
