use serde::Serialize;

use crate::gtfs;

// Bilbobus only serves Bilbao, so the province and municipality are fixed.
const PROVINCIA: &str = "48";
const DESCRIPCION_PROVINCIA: &str = "BIZKAIA";
const MUNICIPIO: &str = "020";
const DESCRIPCION_MUNICIPIO: &str = "BILBAO";

/// A GTFS stop laid out with the municipal dataset field names.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FlatStop {
    pub provincia: String,
    pub descripcion_provincia: String,
    pub municipio: String,
    pub descripcion_municipio: String,
    pub parada: String,
    pub denominacion: String,
    pub direccion: String,
    pub latitud: String,
    pub longitud: String,
}

impl From<&gtfs::Stop> for FlatStop {
    fn from(stop: &gtfs::Stop) -> Self {
        Self {
            provincia: PROVINCIA.to_owned(),
            descripcion_provincia: DESCRIPCION_PROVINCIA.to_owned(),
            municipio: MUNICIPIO.to_owned(),
            descripcion_municipio: DESCRIPCION_MUNICIPIO.to_owned(),
            parada: stop.public_code().to_owned(),
            denominacion: stop.stop_name.to_owned(),
            direccion: stop.stop_desc.to_owned().unwrap_or_default(),
            latitud: stop.stop_lat.to_owned(),
            longitud: stop.stop_lon.to_owned(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlatRoute {
    pub line_id: String,
    pub name: String,
    pub url: String,
}

impl From<&gtfs::Route> for FlatRoute {
    fn from(route: &gtfs::Route) -> Self {
        Self {
            line_id: route.route_short_name.to_owned(),
            name: route.route_long_name.to_owned(),
            url: route.route_url.to_owned().unwrap_or_default(),
        }
    }
}

pub fn flat_stops(stops: &[gtfs::Stop]) -> Vec<FlatStop> {
    stops.iter().map(FlatStop::from).collect()
}

pub fn flat_routes(routes: &[gtfs::Route]) -> Vec<FlatRoute> {
    routes.iter().map(FlatRoute::from).collect()
}
