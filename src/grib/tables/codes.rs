use super::{CodeTable, FlagBit, FlagTable};

pub(crate) const CODE_TABLES: &[CodeTable] = &[
    CodeTable {
        id: "0.0",
        entries: &[
            (0, "Meteorological products"),
            (1, "Hydrological products"),
            (2, "Land surface products"),
            (3, "Satellite remote sensing products"),
            (4, "Space weather products"),
            (10, "Oceanographic products"),
            (20, "Health and socioeconomic impacts"),
            (209, "Multi-Radar Multi-Sensor"),
        ],
    },
    CodeTable {
        id: "C-11",
        entries: &[
            (7, "US National Weather Service - NCEP"),
            (8, "US National Weather Service - NWSTG"),
            (34, "Japanese Meteorological Agency - Tokyo"),
            (54, "Canadian Meteorological Service - Montreal"),
            (74, "UK Meteorological Office - Exeter"),
            (78, "Offenbach (RSMC)"),
            (85, "Toulouse (RSMC)"),
            (98, "European Centre for Medium-Range Weather Forecasts"),
            (161, "US NOAA Office of Oceanic and Atmospheric Research"),
        ],
    },
    CodeTable {
        id: "1.2",
        entries: &[
            (0, "Analysis"),
            (1, "Start of forecast"),
            (2, "Verifying time of forecast"),
            (3, "Observation time"),
            (4, "Local time"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "1.3",
        entries: &[
            (0, "Operational products"),
            (1, "Operational test products"),
            (2, "Research products"),
            (3, "Re-analysis products"),
            (4, "THORPEX Interactive Grand Global Ensemble (TIGGE)"),
            (5, "THORPEX Interactive Grand Global Ensemble (TIGGE) test"),
            (6, "S2S operational products"),
            (7, "S2S test products"),
            (8, "Uncertainties in ensembles of regional reanalysis project (UERRA)"),
            (9, "Uncertainties in ensembles of regional reanalysis project (UERRA) test"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "1.4",
        entries: &[
            (0, "Analysis products"),
            (1, "Forecast products"),
            (2, "Analysis and forecast products"),
            (3, "Control forecast products"),
            (4, "Perturbed forecast products"),
            (5, "Control and perturbed forecast products"),
            (6, "Processed satellite observations"),
            (7, "Processed radar observations"),
            (8, "Event probability"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "3.0",
        entries: &[
            (0, "Specified in Code Table 3.1"),
            (1, "Predetermined grid definition"),
            (255, "A grid definition does not apply to this product"),
        ],
    },
    CodeTable {
        id: "3.1",
        entries: &[
            (0, "Latitude/longitude"),
            (1, "Rotated latitude/longitude"),
            (10, "Mercator"),
            (20, "Polar stereographic projection"),
            (30, "Lambert conformal"),
            (40, "Gaussian latitude/longitude"),
            (90, "Space view perspective or orthographic"),
            (65535, "Missing"),
        ],
    },
    CodeTable {
        id: "3.2",
        entries: &[
            (0, "Earth assumed spherical with radius = 6,367,470.0 m"),
            (1, "Earth assumed spherical with radius specified by data producer"),
            (2, "Earth assumed oblate spheroid with size as determined by IAU in 1965"),
            (3, "Earth assumed oblate spheroid with major and minor axes specified in km"),
            (4, "Earth assumed oblate spheroid as defined in IAG-GRS80 model"),
            (5, "Earth assumed represented by WGS84"),
            (6, "Earth assumed spherical with radius of 6,371,229.0 m"),
            (7, "Earth assumed oblate spheroid with major and minor axes specified in m"),
            (8, "Earth model assumed spherical with radius of 6,371,200 m, WGS84 datum"),
            (9, "Earth represented by the Ordnance Survey Great Britain 1936 Datum"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "3.11",
        entries: &[
            (0, "There is no appended list"),
            (1, "Numbers define number of points corresponding to full coordinate circles"),
            (2, "Numbers define number of points corresponding to coordinate lines delimited by extreme values"),
            (3, "Numbers define the actual latitudes for each row in the grid"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "4.0",
        entries: &[
            (0, "Analysis or forecast at a horizontal level or in a horizontal layer at a point in time"),
            (1, "Individual ensemble forecast at a horizontal level at a point in time"),
            (2, "Derived forecasts based on all ensemble members at a horizontal level at a point in time"),
            (8, "Average, accumulation, extreme values or other statistically processed values in a continuous time interval"),
            (65535, "Missing"),
        ],
    },
    CodeTable {
        id: "4.3",
        entries: &[
            (0, "Analysis"),
            (1, "Initialization"),
            (2, "Forecast"),
            (3, "Bias corrected forecast"),
            (4, "Ensemble forecast"),
            (5, "Probability forecast"),
            (6, "Forecast error"),
            (7, "Analysis error"),
            (8, "Observation"),
            (9, "Climatological"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "4.4",
        entries: &[
            (0, "Minute"),
            (1, "Hour"),
            (2, "Day"),
            (3, "Month"),
            (4, "Year"),
            (5, "Decade (10 years)"),
            (6, "Normal (30 years)"),
            (7, "Century (100 years)"),
            (10, "3 hours"),
            (11, "6 hours"),
            (12, "12 hours"),
            (13, "Second"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "4.5",
        entries: &[
            (1, "Ground or water surface"),
            (2, "Cloud base level"),
            (3, "Level of cloud tops"),
            (4, "Level of 0 deg C isotherm"),
            (6, "Maximum wind level"),
            (7, "Tropopause"),
            (8, "Nominal top of the atmosphere"),
            (10, "Entire atmosphere"),
            (100, "Isobaric surface"),
            (101, "Mean sea level"),
            (102, "Specific altitude above mean sea level"),
            (103, "Specified height level above ground"),
            (104, "Sigma level"),
            (105, "Hybrid level"),
            (106, "Depth below land surface"),
            (200, "Entire atmosphere (considered as a single layer)"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "4.10",
        entries: &[
            (0, "Average"),
            (1, "Accumulation"),
            (2, "Maximum"),
            (3, "Minimum"),
            (4, "Difference (value at the end of the time range minus value at the beginning)"),
            (5, "Root mean square"),
            (6, "Standard deviation"),
            (7, "Covariance"),
            (8, "Difference (value at the beginning of the time range minus value at the end)"),
            (9, "Ratio"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "4.11",
        entries: &[
            (1, "Successive times processed have same forecast time, start time of forecast is incremented"),
            (2, "Successive times processed have same start time of forecast, forecast time is incremented"),
            (3, "Successive times processed have start time of forecast incremented and forecast time decremented"),
            (4, "Successive times processed have start time of forecast decremented and forecast time incremented"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "5.0",
        entries: &[
            (0, "Grid point data - simple packing"),
            (1, "Matrix value at grid point - simple packing"),
            (2, "Grid point data - complex packing"),
            (3, "Grid point data - complex packing and spatial differencing"),
            (4, "Grid point data - IEEE floating point data"),
            (40, "Grid point data - JPEG 2000 code stream format"),
            (41, "Grid point data - PNG"),
            (42, "Grid point data - CCSDS recommended lossless compression"),
            (200, "Run length packing with level values"),
            (65535, "Missing"),
        ],
    },
    CodeTable {
        id: "5.1",
        entries: &[(0, "Floating point"), (1, "Integer"), (255, "Missing")],
    },
    CodeTable {
        id: "5.4",
        entries: &[(0, "Row by row splitting"), (1, "General group splitting"), (255, "Missing")],
    },
    CodeTable {
        id: "5.5",
        entries: &[
            (0, "No explicit missing values included within the data values"),
            (1, "Primary missing values included within the data values"),
            (2, "Primary and secondary missing values included within the data values"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "5.6",
        entries: &[
            (1, "First-order spatial differencing"),
            (2, "Second-order spatial differencing"),
            (255, "Missing"),
        ],
    },
    CodeTable {
        id: "5.7",
        entries: &[(1, "IEEE 32-bit"), (2, "IEEE 64-bit"), (3, "IEEE 128-bit"), (255, "Missing")],
    },
    CodeTable {
        id: "6.0",
        entries: &[
            (0, "A bit map applies to this product and is specified in this section"),
            (254, "A bit map previously defined in the same GRIB2 message applies to this product"),
            (255, "A bit map does not apply to this product"),
        ],
    },
];

pub(crate) const FLAG_TABLES: &[FlagTable] = &[
    FlagTable {
        id: "3.3",
        bits: &[
            FlagBit {
                bit: 3,
                unset: "i direction increments not given",
                set: "i direction increments given",
            },
            FlagBit {
                bit: 4,
                unset: "j direction increments not given",
                set: "j direction increments given",
            },
            FlagBit {
                bit: 5,
                unset: "Resolved u and v components relative to easterly and northerly directions",
                set: "Resolved u and v components relative to the defined grid",
            },
        ],
    },
    FlagTable {
        id: "3.4",
        bits: &[
            FlagBit {
                bit: 1,
                unset: "Points of first row or column scan in the +i (+x) direction",
                set: "Points of first row or column scan in the -i (-x) direction",
            },
            FlagBit {
                bit: 2,
                unset: "Points of first row or column scan in the -j (-y) direction",
                set: "Points of first column scan in the +j (+y) direction",
            },
            FlagBit {
                bit: 3,
                unset: "Adjacent points in i (x) direction are consecutive",
                set: "Adjacent points in j (y) direction are consecutive",
            },
            FlagBit {
                bit: 4,
                unset: "All rows scan in the same direction",
                set: "Adjacent rows scan in the opposite direction",
            },
            FlagBit {
                bit: 5,
                unset: "Points within odd rows are not offset in i (x) direction",
                set: "Points within odd rows are offset by Di/2 in i (x) direction",
            },
            FlagBit {
                bit: 6,
                unset: "Points within even rows are not offset in i (x) direction",
                set: "Points within even rows are offset by Di/2 in i (x) direction",
            },
            FlagBit {
                bit: 7,
                unset: "Points are not offset in j (y) direction",
                set: "Points are offset by Dj/2 in j (y) direction",
            },
            FlagBit {
                bit: 8,
                unset: "Rows have Ni grid points and columns have Nj grid points",
                set: "Rows and columns have offset-dependent point counts",
            },
        ],
    },
    FlagTable {
        id: "3.5",
        bits: &[
            FlagBit {
                bit: 1,
                unset: "North Pole is on the projection plane",
                set: "South Pole is on the projection plane",
            },
            FlagBit {
                bit: 2,
                unset: "Only one projection centre is used",
                set: "Projection is bipolar and symmetric",
            },
        ],
    },
];
