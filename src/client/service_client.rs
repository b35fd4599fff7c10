//! [`ServiceClient`]: typed access to a rusved instance over gRPC.
//!
//! All proto ↔ native type conversions are centralized in [`crate::server::convert`].

use futures_util::StreamExt;
use tonic::transport::{Channel, Endpoint};

use crate::server::convert::error_from_status;
use crate::server::proto;
use crate::server::proto::notes_service_client::NotesServiceClient;
use crate::server::proto::users_service_client::UsersServiceClient;
use crate::server::proto::utils_service_client::UtilsServiceClient;
use crate::service::FileSurface;
use crate::stream::RecordStream;
use crate::types::{
    AuthRequest, File, FileKey, Note, NoteId, PaymentId, Target, User, UserId,
};
use crate::{Result, RusveError};

/// A client for all three services, multiplexed over one HTTP/2 channel.
///
/// Cloning is cheap and clones share the connection.
#[derive(Clone)]
pub struct ServiceClient {
    users: UsersServiceClient<Channel>,
    utils: UtilsServiceClient<Channel>,
    notes: NotesServiceClient<Channel>,
}

impl ServiceClient {
    /// Connect to a rusved server at the given address.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = ServiceClient::connect("http://127.0.0.1:9742").await?;
    /// ```
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        let channel = Endpoint::from_shared(addr.clone())
            .map_err(|e| RusveError::Transport(format!("invalid address {addr}: {e}")))?
            .connect()
            .await
            .map_err(|e| RusveError::Transport(format!("failed to connect to {addr}: {e}")))?;
        Ok(Self::from_channel(channel))
    }

    /// Wrap an existing channel.
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            users: UsersServiceClient::new(channel.clone()),
            utils: UtilsServiceClient::new(channel.clone()),
            notes: NotesServiceClient::new(channel),
        }
    }

    // =========================================================================
    // UsersService
    // =========================================================================

    pub async fn auth(&self, request: AuthRequest) -> Result<User> {
        let response = self
            .users
            .clone()
            .auth(proto::AuthRequest::from(request))
            .await
            .map_err(error_from_status)?;
        User::try_from(response.into_inner())
    }

    pub async fn get_users(&self, ids: &[UserId]) -> Result<RecordStream<User>> {
        let request = proto::UserIds {
            user_ids: ids.iter().map(|id| id.as_str().to_string()).collect(),
        };
        let response = self
            .users
            .clone()
            .get_users(request)
            .await
            .map_err(error_from_status)?;
        Ok(decode_stream(response.into_inner()))
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        let request = proto::UserId {
            user_id: id.as_str().to_string(),
        };
        let response = self
            .users
            .clone()
            .get_user(request)
            .await
            .map_err(error_from_status)?;
        User::try_from(response.into_inner())
    }

    pub async fn update_user(&self, user: User) -> Result<User> {
        let response = self
            .users
            .clone()
            .update_user(proto::User::from(user))
            .await
            .map_err(error_from_status)?;
        User::try_from(response.into_inner())
    }

    pub async fn update_payment_id(&self, user_id: &UserId, payment_id: &PaymentId) -> Result<()> {
        let request = proto::PaymentId {
            user_id: user_id.as_str().to_string(),
            payment_id: payment_id.as_str().to_string(),
        };
        self.users
            .clone()
            .update_payment_id(request)
            .await
            .map_err(error_from_status)?;
        Ok(())
    }

    // =========================================================================
    // File operations, on either surface
    // =========================================================================

    pub async fn get_files(&self, surface: FileSurface, target: &Target) -> Result<RecordStream<File>> {
        let request = proto::TargetId::from(target.clone());
        let response = match surface {
            FileSurface::Users => self.users.clone().get_files(request).await,
            FileSurface::Utils => self.utils.clone().get_files(request).await,
        }
        .map_err(error_from_status)?;
        Ok(decode_stream(response.into_inner()))
    }

    pub async fn get_file(&self, surface: FileSurface, key: &FileKey) -> Result<File> {
        let request = proto::FileId::from(key.clone());
        let response = match surface {
            FileSurface::Users => self.users.clone().get_file(request).await,
            FileSurface::Utils => self.utils.clone().get_file(request).await,
        }
        .map_err(error_from_status)?;
        File::try_from(response.into_inner())
    }

    pub async fn create_file(&self, surface: FileSurface, file: File) -> Result<File> {
        let request = proto::File::from(file);
        let response = match surface {
            FileSurface::Users => self.users.clone().create_file(request).await,
            FileSurface::Utils => self.utils.clone().create_file(request).await,
        }
        .map_err(error_from_status)?;
        File::try_from(response.into_inner())
    }

    pub async fn delete_file(&self, surface: FileSurface, key: &FileKey) -> Result<File> {
        let request = proto::FileId::from(key.clone());
        let response = match surface {
            FileSurface::Users => self.users.clone().delete_file(request).await,
            FileSurface::Utils => self.utils.clone().delete_file(request).await,
        }
        .map_err(error_from_status)?;
        File::try_from(response.into_inner())
    }

    // =========================================================================
    // NotesService
    // =========================================================================

    pub async fn get_notes(&self, user_id: &UserId) -> Result<RecordStream<Note>> {
        let request = proto::UserId {
            user_id: user_id.as_str().to_string(),
        };
        let response = self
            .notes
            .clone()
            .get_notes(request)
            .await
            .map_err(error_from_status)?;
        Ok(decode_stream(response.into_inner()))
    }

    /// Create a note. The wire call acknowledges with `Empty`, so the
    /// assigned id is not reported back.
    pub async fn create_note(&self, note: Note) -> Result<()> {
        self.notes
            .clone()
            .create_note(proto::Note::from(note))
            .await
            .map_err(error_from_status)?;
        Ok(())
    }

    /// Delete a note. `user_id` may be empty.
    pub async fn delete_note(&self, note_id: &NoteId, user_id: &UserId) -> Result<()> {
        let request = proto::NoteId {
            note_id: note_id.as_str().to_string(),
            user_id: user_id.as_str().to_string(),
        };
        self.notes
            .clone()
            .delete_note(request)
            .await
            .map_err(error_from_status)?;
        Ok(())
    }
}

/// Decode a response stream into native records.
fn decode_stream<P, T>(stream: tonic::Streaming<P>) -> RecordStream<T>
where
    P: Send + 'static,
    T: TryFrom<P, Error = RusveError> + Send + 'static,
{
    Box::pin(stream.map(|item| item.map_err(error_from_status).and_then(T::try_from)))
}
