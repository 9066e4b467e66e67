use std::io::Write;
use std::str::FromStr;
use anyhow::{anyhow, Error, Result};
use serde::Serialize;
use super::json;
use super::table::{self, Row};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Table,
    Json,
}

impl Format {
    pub fn write<T: Row + Serialize, W: Write>(&self, rows: &[T], w: W) -> Result<()> {
        match self {
            Self::Table => table::write(rows, w)?,
            Self::Json  => json::write(rows, w)?,
        }
        Ok(())
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::Table
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        match arg {
            "table" => Ok(Self::Table),
            "json"  => Ok(Self::Json),
            _       => Err(anyhow!("unrecognized format '{}', expected 'table' or 'json'", arg)),
        }
    }
}
