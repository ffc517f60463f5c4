use serde::Serialize;

/// Entry of Code Table 4.2, keyed by discipline, category and number.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub discipline: u8,
    pub category: u8,
    pub number: u8,
    pub name: &'static str,
    pub abbrev: &'static str,
    pub units: &'static str,
}

const fn param(
    discipline: u8,
    category: u8,
    number: u8,
    name: &'static str,
    abbrev: &'static str,
    units: &'static str,
) -> Parameter {
    Parameter { discipline, category, number, name, abbrev, units }
}

pub(crate) const PARAMETERS: &[Parameter] = &[
    // Meteorological products, temperature
    param(0, 0, 0, "Temperature", "TMP", "K"),
    param(0, 0, 4, "Maximum temperature", "TMAX", "K"),
    param(0, 0, 5, "Minimum temperature", "TMIN", "K"),
    param(0, 0, 6, "Dew point temperature", "DPT", "K"),
    param(0, 0, 17, "Skin temperature", "SKINT", "K"),
    // moisture
    param(0, 1, 0, "Specific humidity", "SPFH", "kg kg-1"),
    param(0, 1, 1, "Relative humidity", "RH", "%"),
    param(0, 1, 3, "Precipitable water", "PWAT", "kg m-2"),
    param(0, 1, 7, "Precipitation rate", "PRATE", "kg m-2 s-1"),
    param(0, 1, 8, "Total precipitation", "APCP", "kg m-2"),
    param(0, 1, 11, "Snow depth", "SNOD", "m"),
    param(0, 1, 13, "Water equivalent of accumulated snow depth", "WEASD", "kg m-2"),
    param(0, 1, 52, "Total precipitation rate", "TPRATE", "kg m-2 s-1"),
    // momentum
    param(0, 2, 0, "Wind direction (from which blowing)", "WDIR", "degree true"),
    param(0, 2, 1, "Wind speed", "WIND", "m s-1"),
    param(0, 2, 2, "U-component of wind", "UGRD", "m s-1"),
    param(0, 2, 3, "V-component of wind", "VGRD", "m s-1"),
    param(0, 2, 22, "Wind speed (gust)", "GUST", "m s-1"),
    // mass
    param(0, 3, 0, "Pressure", "PRES", "Pa"),
    param(0, 3, 1, "Pressure reduced to MSL", "PRMSL", "Pa"),
    param(0, 3, 5, "Geopotential height", "HGT", "gpm"),
    // cloud
    param(0, 6, 1, "Total cloud cover", "TCDC", "%"),
    // thermodynamic stability
    param(0, 7, 6, "Convective available potential energy", "CAPE", "J kg-1"),
    // radar
    param(0, 15, 1, "Base reflectivity", "BREF", "dB"),
    param(0, 16, 196, "Composite reflectivity", "REFC", "dB"),
    // Hydrological products, basic hydrology
    param(1, 0, 0, "Flash flood guidance", "FFLDG", "kg m-2"),
    param(1, 0, 1, "Flash flood runoff", "FFLDRO", "kg m-2"),
    param(1, 0, 2, "Remotely sensed snow cover", "RSSC", "Code table 4.215"),
    param(1, 0, 3, "Elevation of snow covered terrain", "ESCT", "Code table 4.216"),
    param(1, 0, 4, "Snow water equivalent percent of normal", "SWEPON", "%"),
    param(1, 0, 5, "Baseflow-groundwater runoff", "BGRUN", "kg m-2"),
    param(1, 0, 6, "Storm surface runoff", "SSRUN", "kg m-2"),
    param(1, 0, 7, "Discharge from rivers or streams", "DISRS", "m3 s-1"),
    // hydrology probabilities
    param(1, 1, 0, "Conditional percent precipitation amount fractile for an overall period", "CPPOP", "kg m-2"),
    param(1, 1, 1, "Percent precipitation in a sub-period of an overall period", "PPOSP", "%"),
    param(1, 1, 2, "Probability of 0.01 inch of precipitation", "POP", "%"),
    // inland water and sediment
    param(1, 2, 0, "Water depth", "WDPTHIL", "m"),
    param(1, 2, 1, "Water temperature", "WTMPIL", "K"),
    // Land surface products
    param(2, 0, 0, "Land cover (1 = land, 0 = sea)", "LAND", "Proportion"),
    param(2, 0, 7, "Model terrain height", "MTERH", "m"),
    param(2, 0, 22, "Soil moisture", "SOILM", "kg m-3"),
];
