use crate::Error;
use base_n::{base52, base62, Codec};
use std::{env, error, net::IpAddr, str::FromStr};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Preset {
    Base62,
    Base52,
}

impl Preset {
    pub fn alphabet(self) -> &'static str {
        match self {
            Preset::Base62 => base62::ALPHABET,
            Preset::Base52 => base52::ALPHABET,
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "base62" => Ok(Preset::Base62),
            "base52" => Ok(Preset::Base52),
            _ => Err(Error::new(format!("Unknown preset {}", value))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Configuration {
    host: IpAddr,
    port: u16,
    codec: Codec,
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Option<String>) -> Result<String, String> {
    match lookup(key) {
        Some(value) => Ok(value),
        None => default.ok_or(format!("Missing {}", key)),
    }
}

fn var_map<T, E: error::Error>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    mut f: impl FnMut(&str) -> Result<T, E>,
    default: Option<T>,
) -> Result<T, String> {
    match var(lookup, key, None) {
        Ok(value) => f(&value).map_err(|err| format!("Invalid {} {} ({})", key, value, err)),
        Err(err) => default.ok_or(err),
    }
}

impl Configuration {
    /// Reads `HOST`, `PORT`, `ALPHABET_PRESET` and `ALPHABET` from the environment.
    pub fn new() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// An explicit `ALPHABET` takes precedence over `ALPHABET_PRESET`, which defaults to base62.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let host = var_map(&lookup, "HOST", |host| host.parse(), Some(IpAddr::from([127, 0, 0, 1])))?;
        let port = var_map(&lookup, "PORT", |port| port.parse(), Some(8000))?;
        let preset = var_map(&lookup, "ALPHABET_PRESET", |preset| preset.parse(), Some(Preset::Base62))?;
        let alphabet = var(&lookup, "ALPHABET", Some(preset.alphabet().to_string()))?;
        let codec = Codec::new(&alphabet).map_err(|err| format!("Invalid ALPHABET {} ({})", alphabet, err))?;
        Ok(Self { host, port, codec })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }
}
