use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// One row of the endpoint listing served from `GET /`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: String,
    pub description: &'static str,
}

/// Landing payload: a greeting plus the routes the service exposes.
#[derive(Serialize, Debug, Clone)]
pub struct ApiDescription {
    pub message: String,
    pub endpoints: Vec<EndpointInfo>,
}
