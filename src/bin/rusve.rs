//! rusve: command-line client for rusved
//!
//! Control and test interface for rusved. Records are printed as JSON, one
//! per line for streamed calls. File contents are not part of the JSON; use
//! `rusve file --output` to save them.

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use futures_util::StreamExt;
use serde::Serialize;

use rusve::client::ServiceClient;
use rusve::{
    AuthRequest, File, FileKey, FileSurface, FileType, Note, NoteId, PaymentId, RecordStream,
    Target, UserId, UserRole,
};

/// Rusve CLI client
#[derive(Parser)]
#[command(name = "rusve")]
#[command(version = rusve::PKG_VERSION)]
#[command(about = "Rusve users, files and notes client")]
struct Args {
    /// Server address
    #[arg(
        short,
        long,
        env = "RUSVED_ADDRESS",
        default_value = "http://127.0.0.1:9742"
    )]
    address: String,

    #[command(subcommand)]
    command: Command,
}

/// Which service to route file calls through.
#[derive(Clone, Copy, ValueEnum)]
enum Surface {
    Users,
    Utils,
}

impl From<Surface> for FileSurface {
    fn from(surface: Surface) -> Self {
        match surface {
            Surface::Users => FileSurface::Users,
            Surface::Utils => FileSurface::Utils,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Resolve (or provision) the user for a subject claim
    Auth {
        sub: String,
        email: String,
    },

    /// Fetch users by id
    Users {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Fetch one user
    User {
        id: String,
    },

    /// Update the mutable fields of a user
    UpdateUser {
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        admin: Option<bool>,
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Set the payment id of a user
    Payment {
        user_id: String,
        payment_id: String,
    },

    /// List files of a target
    Files {
        target_id: String,
        #[arg(short = 't', long = "type", default_value = "document")]
        file_type: FileType,
        #[arg(short, long, value_enum, default_value = "utils")]
        surface: Surface,
    },

    /// Fetch one file
    File {
        target_id: String,
        file_id: String,
        #[arg(short, long, value_enum, default_value = "utils")]
        surface: Surface,
        /// Write the contents to this path (`-` for stdout instead of the metadata)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a file; contents are read from stdin
    Upload {
        target_id: String,
        name: String,
        #[arg(short = 't', long = "type", default_value = "document")]
        file_type: FileType,
        /// Explicit file id (assigned by the server when omitted)
        #[arg(long)]
        id: Option<String>,
        #[arg(short, long, value_enum, default_value = "utils")]
        surface: Surface,
    },

    /// Delete one file
    DeleteFile {
        target_id: String,
        file_id: String,
        #[arg(short, long, value_enum, default_value = "utils")]
        surface: Surface,
    },

    /// List notes of a user
    Notes {
        user_id: String,
    },

    /// Create a note (content from the argument or stdin)
    Note {
        user_id: String,
        title: String,
        content: Option<String>,
    },

    /// Delete a note
    DeleteNote {
        note_id: String,
        /// Owner of the note; required when the id is shared by several users
        #[arg(long, default_value = "")]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let client = ServiceClient::connect(args.address).await?;

    match args.command {
        Command::Auth { sub, email } => {
            print_json(&client.auth(AuthRequest::new(sub, email)).await?)?;
        }

        Command::Users { ids } => {
            let ids: Vec<UserId> = ids.into_iter().map(UserId::from).collect();
            print_stream(client.get_users(&ids).await?).await?;
        }

        Command::User { id } => {
            print_json(&client.get_user(&UserId::from(id)).await?)?;
        }

        Command::UpdateUser {
            id,
            email,
            name,
            admin,
            avatar,
        } => {
            let mut user = client.get_user(&UserId::from(id)).await?;
            if let Some(email) = email {
                user.email = email;
            }
            if let Some(name) = name {
                user.name = name;
            }
            if let Some(admin) = admin {
                user.role = if admin { UserRole::Admin } else { UserRole::User };
            }
            if let Some(avatar) = avatar {
                user.avatar_id = (!avatar.is_empty()).then(|| avatar.into());
            }
            print_json(&client.update_user(user).await?)?;
        }

        Command::Payment {
            user_id,
            payment_id,
        } => {
            client
                .update_payment_id(&UserId::from(user_id), &PaymentId::from(payment_id))
                .await?;
        }

        Command::Files {
            target_id,
            file_type,
            surface,
        } => {
            let target = Target::new(target_id, file_type);
            print_stream(client.get_files(surface.into(), &target).await?).await?;
        }

        Command::File {
            target_id,
            file_id,
            surface,
            output,
        } => {
            let key = FileKey::new(target_id, file_id);
            let file = client.get_file(surface.into(), &key).await?;
            match output {
                Some(path) if path == Path::new("-") => {
                    write_contents(&file.buffer, &mut io::stdout().lock())?;
                }
                Some(path) => {
                    write_contents(&file.buffer, &mut std::fs::File::create(&path)?)?;
                    print_json(&file)?;
                }
                None => print_json(&file)?,
            }
        }

        Command::Upload {
            target_id,
            name,
            file_type,
            id,
            surface,
        } => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            let mut file = File::new(&Target::new(target_id, file_type), name, buffer);
            if let Some(id) = id {
                file.id = id.into();
            }
            print_json(&client.create_file(surface.into(), file).await?)?;
        }

        Command::DeleteFile {
            target_id,
            file_id,
            surface,
        } => {
            let key = FileKey::new(target_id, file_id);
            print_json(&client.delete_file(surface.into(), &key).await?)?;
        }

        Command::Notes { user_id } => {
            print_stream(client.get_notes(&UserId::from(user_id)).await?).await?;
        }

        Command::Note {
            user_id,
            title,
            content,
        } => {
            let content = resolve_text(content)?;
            client.create_note(Note::new(user_id, title, content)).await?;
        }

        Command::DeleteNote { note_id, user_id } => {
            client
                .delete_note(&NoteId::from(note_id), &UserId::from(user_id))
                .await?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(record: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(record)?);
    Ok(())
}

async fn print_stream<T: Serialize>(
    mut records: RecordStream<T>,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Some(record) = records.next().await {
        print_json(&record?)?;
    }
    Ok(())
}

fn write_contents(buffer: &[u8], out: &mut impl Write) -> io::Result<()> {
    out.write_all(buffer)?;
    out.flush()
}

/// Note content from the argument, or from stdin when piped. Empty otherwise.
fn resolve_text(arg: Option<String>) -> io::Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    if io::stdin().is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_command_accepts_an_output_path() {
        let args = Args::try_parse_from(["rusve", "file", "t1", "f1", "-o", "out.bin"]).unwrap();
        match args.command {
            Command::File { output, .. } => assert_eq!(output, Some(PathBuf::from("out.bin"))),
            _ => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn contents_are_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        let bytes = [0x89, b'P', b'N', b'G', 0, 0xff];

        write_contents(&bytes, &mut std::fs::File::create(&path).unwrap()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), bytes);

        let mut sink = Vec::new();
        write_contents(&bytes, &mut sink).unwrap();
        assert_eq!(sink, bytes);
    }
}
