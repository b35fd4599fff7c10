//! gRPC service implementations.
//!
//! Thin shims: decode the request, call the facade, encode the answer.
//! Every rule lives in [`crate::service`].

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use tonic::{Request, Response, Status};

use super::convert::{note_ref, payment_ref};
use super::proto;
use super::proto::notes_service_server::{NotesService, NotesServiceServer};
use super::proto::users_service_server::{UsersService, UsersServiceServer};
use super::proto::utils_service_server::{UtilsService, UtilsServiceServer};
use crate::service::{FileRepository, NoteBook, Services, UserDirectory};
use crate::stream::RecordStream;
use crate::types::{AuthRequest, File, FileKey, Note, Target, User, UserId};

/// Response stream of a server-streaming call.
pub type WireStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

fn encode<T, P>(records: RecordStream<T>) -> WireStream<P>
where
    T: Send + 'static,
    P: From<T> + Send + 'static,
{
    Box::pin(records.map(|item| item.map(P::from).map_err(Status::from)))
}

async fn get_files(files: &FileRepository, request: proto::TargetId) -> Result<WireStream<proto::File>, Status> {
    let target = Target::try_from(request)?;
    Ok(encode(files.get_files(&target).await?))
}

async fn get_file(files: &FileRepository, request: proto::FileId) -> Result<proto::File, Status> {
    Ok(files.get_file(&FileKey::from(request)).await?.into())
}

async fn create_file(files: &FileRepository, request: proto::File) -> Result<proto::File, Status> {
    let file = File::try_from(request)?;
    Ok(files.create_file(file).await?.into())
}

async fn delete_file(files: &FileRepository, request: proto::FileId) -> Result<proto::File, Status> {
    Ok(files.delete_file(&FileKey::from(request)).await?.into())
}

/// `rusve.v1.UsersService`: accounts plus files under the user's target.
#[derive(Clone)]
pub struct UsersGrpcService {
    users: UserDirectory,
    files: FileRepository,
}

impl UsersGrpcService {
    pub fn new(users: UserDirectory, files: FileRepository) -> Self {
        Self { users, files }
    }
}

#[tonic::async_trait]
impl UsersService for UsersGrpcService {
    type GetUsersStream = WireStream<proto::User>;
    type GetFilesStream = WireStream<proto::File>;

    async fn auth(&self, request: Request<proto::AuthRequest>) -> Result<Response<proto::User>, Status> {
        let request = AuthRequest::from(request.into_inner());
        let user = self.users.auth(&request).await?;
        Ok(Response::new(user.into()))
    }

    async fn get_users(
        &self,
        request: Request<proto::UserIds>,
    ) -> Result<Response<Self::GetUsersStream>, Status> {
        let ids = request
            .into_inner()
            .user_ids
            .into_iter()
            .map(UserId::from)
            .collect();
        let users = self.users.get_users(ids).await?;
        Ok(Response::new(encode(users)))
    }

    async fn get_user(&self, request: Request<proto::UserId>) -> Result<Response<proto::User>, Status> {
        let id = UserId::from(request.into_inner().user_id);
        Ok(Response::new(self.users.get_user(&id).await?.into()))
    }

    async fn update_user(&self, request: Request<proto::User>) -> Result<Response<proto::User>, Status> {
        let user = User::try_from(request.into_inner())?;
        Ok(Response::new(self.users.update_user(user).await?.into()))
    }

    async fn update_payment_id(
        &self,
        request: Request<proto::PaymentId>,
    ) -> Result<Response<proto::Empty>, Status> {
        let (user_id, payment_id) = payment_ref(request.into_inner());
        self.users.update_payment_id(&user_id, payment_id).await?;
        Ok(Response::new(proto::Empty {}))
    }

    async fn get_files(
        &self,
        request: Request<proto::TargetId>,
    ) -> Result<Response<Self::GetFilesStream>, Status> {
        get_files(&self.files, request.into_inner()).await.map(Response::new)
    }

    async fn get_file(&self, request: Request<proto::FileId>) -> Result<Response<proto::File>, Status> {
        get_file(&self.files, request.into_inner()).await.map(Response::new)
    }

    async fn create_file(&self, request: Request<proto::File>) -> Result<Response<proto::File>, Status> {
        create_file(&self.files, request.into_inner()).await.map(Response::new)
    }

    async fn delete_file(&self, request: Request<proto::FileId>) -> Result<Response<proto::File>, Status> {
        delete_file(&self.files, request.into_inner()).await.map(Response::new)
    }
}

/// `rusve.v1.UtilsService`: file operations without user context.
#[derive(Clone)]
pub struct UtilsGrpcService {
    files: FileRepository,
}

impl UtilsGrpcService {
    pub fn new(files: FileRepository) -> Self {
        Self { files }
    }
}

#[tonic::async_trait]
impl UtilsService for UtilsGrpcService {
    type GetFilesStream = WireStream<proto::File>;

    async fn get_files(
        &self,
        request: Request<proto::TargetId>,
    ) -> Result<Response<Self::GetFilesStream>, Status> {
        get_files(&self.files, request.into_inner()).await.map(Response::new)
    }

    async fn get_file(&self, request: Request<proto::FileId>) -> Result<Response<proto::File>, Status> {
        get_file(&self.files, request.into_inner()).await.map(Response::new)
    }

    async fn create_file(&self, request: Request<proto::File>) -> Result<Response<proto::File>, Status> {
        create_file(&self.files, request.into_inner()).await.map(Response::new)
    }

    async fn delete_file(&self, request: Request<proto::FileId>) -> Result<Response<proto::File>, Status> {
        delete_file(&self.files, request.into_inner()).await.map(Response::new)
    }
}

/// `rusve.v1.NotesService`.
#[derive(Clone)]
pub struct NotesGrpcService {
    notes: NoteBook,
}

impl NotesGrpcService {
    pub fn new(notes: NoteBook) -> Self {
        Self { notes }
    }
}

#[tonic::async_trait]
impl NotesService for NotesGrpcService {
    type GetNotesStream = WireStream<proto::Note>;

    async fn get_notes(
        &self,
        request: Request<proto::UserId>,
    ) -> Result<Response<Self::GetNotesStream>, Status> {
        let user_id = UserId::from(request.into_inner().user_id);
        let notes = self.notes.get_notes(&user_id).await?;
        Ok(Response::new(encode(notes)))
    }

    async fn create_note(&self, request: Request<proto::Note>) -> Result<Response<proto::Empty>, Status> {
        let note = Note::try_from(request.into_inner())?;
        self.notes.create_note(note).await?;
        Ok(Response::new(proto::Empty {}))
    }

    async fn delete_note(&self, request: Request<proto::NoteId>) -> Result<Response<proto::Empty>, Status> {
        let (note_id, user_id) = note_ref(request.into_inner());
        self.notes.delete_note(&note_id, &user_id).await?;
        Ok(Response::new(proto::Empty {}))
    }
}

/// The three tonic servers for one set of facades.
pub struct Routers {
    pub users: UsersServiceServer<UsersGrpcService>,
    pub utils: UtilsServiceServer<UtilsGrpcService>,
    pub notes: NotesServiceServer<NotesGrpcService>,
}

impl From<Services> for Routers {
    fn from(services: Services) -> Self {
        Routers {
            users: UsersServiceServer::new(UsersGrpcService::new(
                services.users,
                services.user_files,
            )),
            utils: UtilsServiceServer::new(UtilsGrpcService::new(services.utils_files)),
            notes: NotesServiceServer::new(NotesGrpcService::new(services.notes)),
        }
    }
}
