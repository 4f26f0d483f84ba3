//! # Command Loop
//!
//! JSON-lines protocol between the runtime and its driver.
//!
//! ```text
//! stdin:  {"op":"set_authority","caller":"ST1DEPLOYER","height":1,"authority":"ST1AUTH"}
//! stdout: {"ok":true,"value":true}
//! stdin:  {"op":"get","id":99}
//! stdout: {"ok":true,"value":null}
//! stdin:  {"op":"update","caller":"ST2","height":5,"id":99,"location":"L","description":"D"}
//! stdout: {"ok":false,"code":107,"error":"property not found: 99"}
//! ```
//!
//! A line that does not parse as a command is answered with code
//! [`MALFORMED_COMMAND`] and the loop keeps going.

use anyhow::Context;
use registry_engine::domain::entities::{Property, PropertyUpdate, RegisterPropertyRequest};
use registry_engine::errors::ServiceError;
use registry_engine::ports::inbound::PropertyRegistryApi;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{BlockHeight, CallContext, Principal};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Response code for lines that are not valid commands.
pub const MALFORMED_COMMAND: u32 = 0;

/// One request line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetAuthority {
        caller: Principal,
        height: BlockHeight,
        authority: Principal,
    },
    SetFee {
        caller: Principal,
        height: BlockHeight,
        amount: u64,
    },
    Register {
        caller: Principal,
        height: BlockHeight,
        location: String,
        description: String,
        /// Hex, with or without `0x`.
        legal_hash: String,
        total_tokens: u64,
        value: u64,
        currency: String,
        property_type: String,
        capacity: u32,
        #[serde(default)]
        amenities: String,
    },
    Update {
        caller: Principal,
        height: BlockHeight,
        id: u64,
        location: String,
        description: String,
    },
    Get {
        id: u64,
    },
    GetUpdate {
        id: u64,
    },
    Count,
    Verify {
        id: u64,
    },
    GetFee,
    GetAuthority,
    GetIdByLocation {
        location: String,
    },
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub ok: bool,
    /// Result on success (`null` for an absent query result).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Failure code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    /// Failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Successful response carrying `value`.
    #[must_use]
    pub fn ok(value: Value) -> Self {
        Self {
            ok: true,
            value: Some(value),
            code: None,
            error: None,
        }
    }

    /// Failed response.
    #[must_use]
    pub fn err(code: u32, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: None,
            code: Some(code),
            error: Some(error.into()),
        }
    }
}

impl From<ServiceError> for Response {
    fn from(err: ServiceError) -> Self {
        Self::err(err.code(), err.to_string())
    }
}

/// Parses and executes a single line.
pub fn handle_line<A>(api: &A, line: &str) -> Response
where
    A: PropertyRegistryApi + ?Sized,
{
    match serde_json::from_str::<Command>(line) {
        Ok(command) => execute(api, command),
        Err(e) => {
            warn!(error = %e, "Malformed command");
            Response::err(MALFORMED_COMMAND, format!("malformed command: {e}"))
        }
    }
}

/// Executes a parsed command.
pub fn execute<A>(api: &A, command: Command) -> Response
where
    A: PropertyRegistryApi + ?Sized,
{
    let result = match command {
        Command::SetAuthority {
            caller,
            height,
            authority,
        } => api
            .set_authority_contract(&CallContext::new(caller, height), authority)
            .map(|()| Value::Bool(true)),
        Command::SetFee {
            caller,
            height,
            amount,
        } => api
            .set_registration_fee(&CallContext::new(caller, height), amount)
            .map(|()| Value::Bool(true)),
        Command::Register {
            caller,
            height,
            location,
            description,
            legal_hash,
            total_tokens,
            value,
            currency,
            property_type,
            capacity,
            amenities,
        } => {
            let hex_str = legal_hash.strip_prefix("0x").unwrap_or(&legal_hash);
            let legal_hash = match hex::decode(hex_str) {
                Ok(bytes) => bytes,
                Err(e) => {
                    return Response::err(
                        MALFORMED_COMMAND,
                        format!("malformed command: legal_hash is not hex: {e}"),
                    )
                }
            };
            let request = RegisterPropertyRequest {
                location,
                description,
                legal_hash,
                total_tokens,
                value,
                currency,
                property_type,
                capacity,
                amenities,
            };
            api.register_property(&CallContext::new(caller, height), request)
                .map(Value::from)
        }
        Command::Update {
            caller,
            height,
            id,
            location,
            description,
        } => api
            .update_property(&CallContext::new(caller, height), id, location, description)
            .map(|()| Value::Bool(true)),
        Command::Get { id } => Ok(api
            .get_property(id)
            .map_or(Value::Null, |p| property_json(&p))),
        Command::GetUpdate { id } => Ok(api
            .get_property_update(id)
            .map_or(Value::Null, |u| update_json(&u))),
        Command::Count => Ok(Value::from(api.get_property_count())),
        Command::Verify { id } => Ok(Value::Bool(api.verify_property(id))),
        Command::GetFee => Ok(Value::from(api.get_registration_fee())),
        Command::GetAuthority => Ok(api
            .get_authority_contract()
            .map_or(Value::Null, |a| Value::String(a.to_string()))),
        Command::GetIdByLocation { location } => Ok(api
            .get_property_id_by_location(&location)
            .map_or(Value::Null, Value::from)),
    };

    match result {
        Ok(value) => Response::ok(value),
        Err(err) => err.into(),
    }
}

/// Processes `input` line by line until EOF. Returns the number of
/// commands answered.
pub fn run<A, R, W>(api: &A, input: R, mut output: W) -> anyhow::Result<usize>
where
    A: PropertyRegistryApi + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut answered = 0;
    for line in input.lines() {
        let line = line.context("failed to read command line")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(api, &line);
        debug!(ok = response.ok, code = ?response.code, "Command answered");

        serde_json::to_writer(&mut output, &response).context("failed to encode response")?;
        output.write_all(b"\n")?;
        output.flush()?;
        answered += 1;
    }
    Ok(answered)
}

fn property_json(property: &Property) -> Value {
    json!({
        "owner": property.owner,
        "location": property.location,
        "description": property.description,
        "legal_hash": property.legal_hash.to_hex(),
        "total_tokens": property.total_tokens,
        "timestamp": property.timestamp,
        "value": property.value,
        "currency": property.currency.as_str(),
        "status": property.status,
        "property_type": property.property_type.as_str(),
        "capacity": property.capacity,
        "amenities": property.amenities,
    })
}

fn update_json(update: &PropertyUpdate) -> Value {
    json!({
        "update_location": update.update_location,
        "update_description": update.update_description,
        "update_timestamp": update.update_timestamp,
        "updater": update.updater,
    })
}
