/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Source tables and the generated data container
//!
//! [`EndlDataContainer`] and [`AceEprTable`] hold the evaluated source data;
//! [`ElectronPhotonRelaxationDataContainer`] is what the generators produce.
//! All of them are read from and written to JSON.

pub mod ace;
pub mod container;
pub mod endl;
pub mod errors;
pub mod secondary;
pub mod subshell;
pub mod tabulated;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub use ace::{AceEprTable, AceTransition};
pub use container::{
    ElectronCrossSectionType, ElectronPhotonRelaxationDataContainer, GenerationParameters,
    PhotonCrossSectionType, SubshellRelaxationData,
};
pub use endl::EndlDataContainer;
pub use errors::{DataError, Result};
pub use secondary::SecondaryDistributionTable;
pub use subshell::{subshell_name, Subshell};
pub use tabulated::TabulatedData;

fn read_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_json<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
