//! The method table of the `rusve.v1` package.
//!
//! Lists every call the three services expose, with its request and response
//! message and its cardinality. `build.rs` renders [`METHODS`] from the list
//! it also generates the service stubs from.

use std::fmt;

/// Whether a call answers with one message or with a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// One request, exactly one response.
    Unary,
    /// One request, a sequence of responses ended by end-of-stream.
    ServerStreaming,
}

/// One RPC of the method table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub service: &'static str,
    pub method: &'static str,
    pub request: &'static str,
    pub response: &'static str,
    pub cardinality: Cardinality,
}

impl MethodDescriptor {
    /// gRPC path, e.g. `/rusve.v1.NotesService/GetNotes`.
    pub fn path(&self) -> String {
        format!("/{PACKAGE}.{}/{}", self.service, self.method)
    }

    pub fn is_streaming(&self) -> bool {
        self.cardinality == Cardinality::ServerStreaming
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service, self.method)
    }
}

pub const PACKAGE: &str = "rusve.v1";

const fn unary(
    service: &'static str,
    method: &'static str,
    request: &'static str,
    response: &'static str,
) -> MethodDescriptor {
    MethodDescriptor {
        service,
        method,
        request,
        response,
        cardinality: Cardinality::Unary,
    }
}

const fn streaming(
    service: &'static str,
    method: &'static str,
    request: &'static str,
    response: &'static str,
) -> MethodDescriptor {
    MethodDescriptor {
        service,
        method,
        request,
        response,
        cardinality: Cardinality::ServerStreaming,
    }
}

include!(concat!(env!("OUT_DIR"), "/rusve.v1.methods.rs"));

/// Resolve `Service.Method` (or a full `/rusve.v1.Service/Method` path).
pub fn lookup(name: &str) -> Option<&'static MethodDescriptor> {
    let name = name.trim_start_matches('/');
    let name = name
        .strip_prefix(PACKAGE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(name);
    let (service, method) = name.split_once(['.', '/'])?;
    METHODS
        .iter()
        .find(|m| m.service == service && m.method == method)
}

/// All methods of one service, in table order.
pub fn service_methods(service: &str) -> impl Iterator<Item = &'static MethodDescriptor> + '_ {
    METHODS.iter().filter(move |m| m.service == service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_dotted_name() {
        let m = lookup("NotesService.GetNotes").unwrap();
        assert_eq!(m.cardinality, Cardinality::ServerStreaming);
        assert_eq!(m.response, "Note");
    }

    #[test]
    fn lookup_by_path() {
        let m = lookup("/rusve.v1.UsersService/UpdatePaymentId").unwrap();
        assert_eq!(m.response, "Empty");
        assert_eq!(m.path(), "/rusve.v1.UsersService/UpdatePaymentId");
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert!(lookup("NotesService.UpdateNote").is_none());
        assert!(lookup("GetNotes").is_none());
    }

    #[test]
    fn file_operations_exist_on_both_surfaces() {
        for service in ["UsersService", "UtilsService"] {
            let names: Vec<_> = service_methods(service).map(|m| m.method).collect();
            for method in ["GetFiles", "GetFile", "CreateFile", "DeleteFile"] {
                assert!(names.contains(&method), "{service}.{method}");
            }
        }
    }

    #[test]
    fn every_streaming_call_lists_records() {
        let streaming: Vec<_> = METHODS.iter().filter(|m| m.is_streaming()).collect();
        assert_eq!(streaming.len(), 4);
        assert!(streaming.iter().all(|m| m.method.starts_with("Get")));
    }

    /// (service, method, request, response, streaming) for each `rpc` line.
    fn declared_rpcs(proto: &str) -> Vec<(String, String, String, String, bool)> {
        let mut service = None;
        let mut rpcs = Vec::new();
        for line in proto.lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix("service ") {
                service = rest.split_whitespace().next();
                continue;
            }
            if line == "}" {
                service = None;
                continue;
            }
            let (Some(service), Some(rpc)) = (service, line.strip_prefix("rpc ")) else {
                continue;
            };
            let (method, rest) = rpc.split_once('(').unwrap();
            let (request, rest) = rest.split_once(')').unwrap();
            let (_, response) = rest.split_once('(').unwrap();
            let (response, _) = response.split_once(')').unwrap();
            let (streaming, response) = match response.trim().strip_prefix("stream ") {
                Some(inner) => (true, inner),
                None => (false, response),
            };
            rpcs.push((
                service.to_string(),
                method.trim().to_string(),
                request.trim().to_string(),
                response.trim().to_string(),
                streaming,
            ));
        }
        rpcs
    }

    #[test]
    fn table_matches_proto_declarations() {
        let declared = declared_rpcs(include_str!("../../proto/rusve.proto"));
        let table: Vec<_> = METHODS
            .iter()
            .map(|m| {
                (
                    m.service.to_string(),
                    m.method.to_string(),
                    m.request.to_string(),
                    m.response.to_string(),
                    m.is_streaming(),
                )
            })
            .collect();
        assert_eq!(table, declared);
    }

    #[test]
    fn rpc_lines_parse_streaming_responses() {
        let proto = "service S {\n  rpc A(X) returns (stream Y);\n  rpc B(Y) returns (Z);\n}\n";
        let rpcs = declared_rpcs(proto);
        assert_eq!(rpcs.len(), 2);
        assert_eq!(rpcs[0], ("S".into(), "A".into(), "X".into(), "Y".into(), true));
        assert!(!rpcs[1].4);
    }
}
