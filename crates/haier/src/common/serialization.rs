use std::io::{Read, Write};

use bincode::Options;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[inline]
pub(crate) fn bincode_config() -> impl Options {
    bincode::DefaultOptions::new().allow_trailing_bytes()
}

pub fn write_bincode<T: Serialize, W: Write>(writer: W, value: &T) -> crate::Result<()> {
    bincode_config().serialize_into(writer, value)?;
    Ok(())
}

pub fn read_bincode<T: DeserializeOwned, R: Read>(reader: R) -> crate::Result<T> {
    Ok(bincode_config().deserialize_from(reader)?)
}
