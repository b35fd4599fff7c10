use std::fmt::Write as _;

use vergen_gitcl::{Build, Cargo, Emitter, Gitcl};

/// (rust name, route name, input, output, server streaming)
type MethodSpec = (&'static str, &'static str, &'static str, &'static str, bool);

const FILE_METHODS: &[MethodSpec] = &[
    ("get_files", "GetFiles", "TargetId", "File", true),
    ("get_file", "GetFile", "FileId", "File", false),
    ("create_file", "CreateFile", "File", "File", false),
    ("delete_file", "DeleteFile", "FileId", "File", false),
];

const USER_METHODS: &[MethodSpec] = &[
    ("auth", "Auth", "AuthRequest", "User", false),
    ("get_users", "GetUsers", "UserIds", "User", true),
    ("get_user", "GetUser", "UserId", "User", false),
    ("update_user", "UpdateUser", "User", "User", false),
    ("update_payment_id", "UpdatePaymentId", "PaymentId", "Empty", false),
];

const NOTE_METHODS: &[MethodSpec] = &[
    ("get_notes", "GetNotes", "UserId", "Note", true),
    ("create_note", "CreateNote", "Note", "Empty", false),
    ("delete_note", "DeleteNote", "NoteId", "Empty", false),
];

/// Render the runtime method table included by `src/server/routes.rs`.
fn method_table(services: &[(&str, Vec<MethodSpec>)]) -> Result<String, std::fmt::Error> {
    let mut out = String::from("/// Every call of the three services, in declaration order.\n");
    out.push_str("pub const METHODS: &[MethodDescriptor] = &[\n");
    for (service, methods) in services {
        for (_, route, input, output, streaming) in methods {
            let ctor = if *streaming { "streaming" } else { "unary" };
            writeln!(out, "    {ctor}(\"{service}\", \"{route}\", \"{input}\", \"{output}\"),")?;
        }
    }
    out.push_str("];\n");
    Ok(out)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = Build::builder().build_timestamp(true).build();
    let cargo = Cargo::builder().build();
    let gitcl = Gitcl::builder().branch(true).sha(true).dirty(true).build();

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&gitcl)?
        .emit()?;

    println!("cargo:rerun-if-changed=build.rs");

    let services = [
        ("UsersService", [USER_METHODS, FILE_METHODS].concat()),
        ("UtilsService", FILE_METHODS.to_vec()),
        ("NotesService", NOTE_METHODS.to_vec()),
    ];

    let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR")?);
    std::fs::write(out_dir.join("rusve.v1.methods.rs"), method_table(&services)?)?;

    // Service stubs come from the same list. Message types are hand-written
    // prost structs in `src/server/proto.rs` mirroring `proto/rusve.proto`,
    // so no protoc is needed at build time.
    // Package features reach build scripts as env vars, not cfgs.
    let server = std::env::var_os("CARGO_FEATURE_SERVER").is_some();
    let client = std::env::var_os("CARGO_FEATURE_CLIENT").is_some();
    if server || client {
        use tonic_build::manual::{Builder, Method, Service};

        const PACKAGE: &str = "rusve.v1";
        const CODEC: &str = "tonic::codec::ProstCodec";

        let compiled: Vec<Service> = services
            .iter()
            .map(|(name, methods)| {
                let mut builder = Service::builder().name(*name).package(PACKAGE);
                for (rust_name, route, input, output, streaming) in methods {
                    let mut method = Method::builder()
                        .name(*rust_name)
                        .route_name(*route)
                        .input_type(format!("crate::server::proto::{input}"))
                        .output_type(format!("crate::server::proto::{output}"))
                        .codec_path(CODEC);
                    if *streaming {
                        method = method.server_streaming();
                    }
                    builder = builder.method(method.build());
                }
                builder.build()
            })
            .collect();

        Builder::new()
            .build_server(server)
            .build_client(client)
            .compile(&compiled);
    }

    Ok(())
}
