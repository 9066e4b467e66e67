use std::fmt;
use std::time::Duration;
use anyhow::{Context, Result};
use libc::pid_t;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use super::exec;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct Namespace {
    #[serde(deserialize_with = "integer")]
    pub ns:  u64,
    #[serde(deserialize_with = "integer")]
    pub pid: pid_t,
}

#[derive(Deserialize)]
struct Listing {
    namespaces: Vec<Namespace>,
}

pub async fn namespaces(limit: Duration) -> Result<Vec<Namespace>> {
    let args   = ["--json", "--type", "net", "--output", "ns,pid"];
    let output = exec::run("lsns", &args, limit).await?;
    parse(&output)
}

pub fn parse(output: &[u8]) -> Result<Vec<Namespace>> {
    let listing: Listing = serde_json::from_slice(output).context("invalid lsns output")?;
    Ok(listing.namespaces)
}

// util-linux changed ns and pid from strings to numbers at some point,
// so accept either.
fn integer<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::convert::TryFrom<u64> + std::str::FromStr,
{
    struct Integer<T>(std::marker::PhantomData<T>);

    impl<'de, T> Visitor<'de> for Integer<T>
    where
        T: std::convert::TryFrom<u64> + std::str::FromStr,
    {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a string holding one")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
            T::try_from(v).map_err(|_| E::custom(format!("integer out of range: {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
            v.trim().parse().map_err(|_| E::custom(format!("invalid integer: {:?}", v)))
        }
    }

    d.deserialize_any(Integer(std::marker::PhantomData))
}
