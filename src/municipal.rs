use std::{fs::File, io::BufReader, io::Read, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProcessingError, Result};

/// A stop from the municipal stops API dump. Values are kept as raw JSON so
/// they are written back exactly as read; absent fields become `null`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MunicipalStop {
    #[serde(default)]
    pub provincia: Option<Value>,
    #[serde(default)]
    pub descripcion_provincia: Option<Value>,
    #[serde(default)]
    pub municipio: Option<Value>,
    #[serde(default)]
    pub descripcion_municipio: Option<Value>,
    #[serde(default)]
    pub parada: Option<Value>,
    #[serde(default)]
    pub denominacion: Option<Value>,
    #[serde(default)]
    pub direccion: Option<Value>,
    #[serde(default)]
    pub coordx: Option<Value>,
    #[serde(default)]
    pub coordy: Option<Value>,
    #[serde(default)]
    pub latitud: Option<Value>,
    #[serde(default)]
    pub longitud: Option<Value>,
}

impl MunicipalStop {
    pub fn in_municipality(&self, code: &str) -> bool {
        matches!(&self.municipio, Some(Value::String(municipio)) if municipio == code)
    }
}

pub fn read_stops<R: Read>(reader: R) -> Result<Vec<MunicipalStop>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_stops_from_path(path: &Path) -> Result<Vec<MunicipalStop>> {
    if !path.is_file() {
        return Err(ProcessingError::MissingFile(path.to_path_buf()));
    }
    read_stops(BufReader::new(File::open(path)?))
}

/// Keeps the stops of one municipality, in source order.
pub fn filter_by_municipality(stops: Vec<MunicipalStop>, code: &str) -> Vec<MunicipalStop> {
    stops
        .into_iter()
        .filter(|stop| stop.in_municipality(code))
        .collect()
}
