use serde_json::Value;
use tracing::warn;

use crate::config::Config;
use crate::error::Result;
use crate::host::Host;
use crate::kernel::session::Session;

pub const VERSION: &str = "Capturevate V0.1";
pub const VERSION_SENTINEL: &str = "version";

pub enum Invocation {
    /// Capability query. Answers with [`VERSION`] and touches nothing.
    Version,
    Init(Config),
}

impl Invocation {
    /// `"version"` is the query sentinel, `null` a default config, anything
    /// else is parsed as a config.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::String(s) if s == VERSION_SENTINEL => Ok(Invocation::Version),
            Value::Null => Ok(Invocation::Init(Config::default())),
            other => Ok(Invocation::Init(Config::from_value(other)?)),
        }
    }
}

pub enum Outcome {
    Version(&'static str),
    Started(Session),
    /// The host lacked a required capability. Nothing is recorded or sent.
    Inert,
}

impl Outcome {
    pub fn into_session(self) -> Option<Session> {
        match self {
            Outcome::Started(session) => Some(session),
            _ => None,
        }
    }
}

pub fn capturevate(invocation: Invocation, host: Host) -> Outcome {
    let config = match invocation {
        Invocation::Version => return Outcome::Version(VERSION),
        Invocation::Init(config) => config,
    };

    match (host.environment.as_deref(), host.transport.clone()) {
        (Some(env), Some(transport)) => Outcome::Started(Session::start(config, env, transport)),
        _ => {
            warn!("{} required to use Capturevate", host.missing().join(" and "));
            Outcome::Inert
        }
    }
}
