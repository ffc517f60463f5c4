use super::FieldType::{F32, U16, U32, U8};
use super::{FieldSpec as F, Template};

/// Section 1: Identification section
pub(crate) const SECTION1: &[F] = &[
    F::new("section_length", 1, U32),
    F::new("section_number", 5, U8),
    F::new("centre", 6, U16).code("C-11"),
    F::new("subcentre", 8, U16),
    F::new("master_table_version", 10, U8),
    F::new("local_table_version", 11, U8),
    F::new("ref_time_significance", 12, U8).code("1.2"),
    F::new("year", 13, U16),
    F::new("month", 15, U8),
    F::new("day", 16, U8),
    F::new("hour", 17, U8),
    F::new("minute", 18, U8),
    F::new("second", 19, U8),
    F::new("production_status", 20, U8).code("1.3"),
    F::new("data_type", 21, U8).code("1.4"),
];

/// Section 3: Grid definition section, octets 1-14
pub(crate) const SECTION3_PREFIX: &[F] = &[
    F::new("section_length", 1, U32),
    F::new("section_number", 5, U8),
    F::new("source", 6, U8).code("3.0"),
    F::new("num_points", 7, U32),
    F::new("optional_list_octets", 11, U8),
    F::new("optional_list_interpretation", 12, U8).code("3.11"),
    F::new("template_number", 13, U16).code("3.1"),
];

/// Section 4: Product definition section, octets 1-9
pub(crate) const SECTION4_PREFIX: &[F] = &[
    F::new("section_length", 1, U32),
    F::new("section_number", 5, U8),
    F::new("num_coordinates", 6, U16),
    F::new("template_number", 8, U16).code("4.0"),
];

/// Section 5: Data representation section, octets 1-11
pub(crate) const SECTION5_PREFIX: &[F] = &[
    F::new("section_length", 1, U32),
    F::new("section_number", 5, U8),
    F::new("num_points", 6, U32),
    F::new("template_number", 10, U16).code("5.0"),
];

/// Section 6: Bit-map section, octets 1-6
pub(crate) const SECTION6: &[F] = &[
    F::new("section_length", 1, U32),
    F::new("section_number", 5, U8),
    F::new("bitmap_indicator", 6, U8).code("6.0"),
];

const GRID_0: &[F] = &[
    F::new("earth_shape", 15, U8).code("3.2"),
    F::new("radius_scale_factor", 16, U8),
    F::new("radius_scaled_value", 17, U32),
    F::new("major_axis_scale_factor", 21, U8),
    F::new("major_axis_scaled_value", 22, U32),
    F::new("minor_axis_scale_factor", 26, U8),
    F::new("minor_axis_scaled_value", 27, U32),
    F::new("ni", 31, U32),
    F::new("nj", 35, U32),
    F::new("basic_angle", 39, U32),
    F::new("basic_angle_subdivisions", 43, U32),
    F::new("la1", 47, U32).signed(),
    F::new("lo1", 51, U32).signed(),
    F::new("resolution_flags", 55, U8).flags("3.3"),
    F::new("la2", 56, U32).signed(),
    F::new("lo2", 60, U32).signed(),
    F::new("di", 64, U32),
    F::new("dj", 68, U32),
    F::new("scanning_mode", 72, U8).flags("3.4"),
];

const GRID_30: &[F] = &[
    F::new("earth_shape", 15, U8).code("3.2"),
    F::new("radius_scale_factor", 16, U8),
    F::new("radius_scaled_value", 17, U32),
    F::new("major_axis_scale_factor", 21, U8),
    F::new("major_axis_scaled_value", 22, U32),
    F::new("minor_axis_scale_factor", 26, U8),
    F::new("minor_axis_scaled_value", 27, U32),
    F::new("nx", 31, U32),
    F::new("ny", 35, U32),
    F::new("la1", 39, U32).signed(),
    F::new("lo1", 43, U32).signed(),
    F::new("resolution_flags", 47, U8).flags("3.3"),
    F::new("lad", 48, U32).signed(),
    F::new("lov", 52, U32).signed(),
    F::new("dx", 56, U32),
    F::new("dy", 60, U32),
    F::new("projection_centre", 64, U8).flags("3.5"),
    F::new("scanning_mode", 65, U8).flags("3.4"),
    F::new("latin1", 66, U32).signed(),
    F::new("latin2", 70, U32).signed(),
    F::new("south_pole_lat", 74, U32).signed(),
    F::new("south_pole_lon", 78, U32).signed(),
];

const PRODUCT_0: &[F] = &[
    F::new("parameter_category", 10, U8),
    F::new("parameter_number", 11, U8),
    F::new("generating_process", 12, U8).code("4.3"),
    F::new("background_process", 13, U8),
    F::new("forecast_process", 14, U8),
    F::new("cutoff_hours", 15, U16),
    F::new("cutoff_minutes", 17, U8),
    F::new("time_unit", 18, U8).code("4.4"),
    F::new("forecast_time", 19, U32),
    F::new("first_surface_type", 23, U8).code("4.5"),
    F::new("first_surface_scale", 24, U8).signed(),
    F::new("first_surface_value", 25, U32).signed(),
    F::new("second_surface_type", 29, U8).code("4.5"),
    F::new("second_surface_scale", 30, U8).signed(),
    F::new("second_surface_value", 31, U32).signed(),
];

const PRODUCT_8: &[F] = &[
    F::new("parameter_category", 10, U8),
    F::new("parameter_number", 11, U8),
    F::new("generating_process", 12, U8).code("4.3"),
    F::new("background_process", 13, U8),
    F::new("forecast_process", 14, U8),
    F::new("cutoff_hours", 15, U16),
    F::new("cutoff_minutes", 17, U8),
    F::new("time_unit", 18, U8).code("4.4"),
    F::new("forecast_time", 19, U32),
    F::new("first_surface_type", 23, U8).code("4.5"),
    F::new("first_surface_scale", 24, U8).signed(),
    F::new("first_surface_value", 25, U32).signed(),
    F::new("second_surface_type", 29, U8).code("4.5"),
    F::new("second_surface_scale", 30, U8).signed(),
    F::new("second_surface_value", 31, U32).signed(),
    F::new("interval_end_year", 35, U16),
    F::new("interval_end_month", 37, U8),
    F::new("interval_end_day", 38, U8),
    F::new("interval_end_hour", 39, U8),
    F::new("interval_end_minute", 40, U8),
    F::new("interval_end_second", 41, U8),
    F::new("time_range_count", 42, U8),
    F::new("missing_count", 43, U32),
    F::new("statistical_process", 47, U8).code("4.10"),
    F::new("increment_type", 48, U8).code("4.11"),
    F::new("range_unit", 49, U8).code("4.4"),
    F::new("range_length", 50, U32),
    F::new("increment_unit", 54, U8).code("4.4"),
    F::new("increment_length", 55, U32),
];

const DATA_0: &[F] = &[
    F::new("reference_value", 12, F32),
    F::new("binary_scale_factor", 16, U16).signed(),
    F::new("decimal_scale_factor", 18, U16).signed(),
    F::new("num_bits", 20, U8),
    F::new("original_type", 21, U8).code("5.1"),
];

const DATA_2: &[F] = &[
    F::new("reference_value", 12, F32),
    F::new("binary_scale_factor", 16, U16).signed(),
    F::new("decimal_scale_factor", 18, U16).signed(),
    F::new("num_bits", 20, U8),
    F::new("original_type", 21, U8).code("5.1"),
    F::new("group_method", 22, U8).code("5.4"),
    F::new("missing_management", 23, U8).code("5.5"),
    F::new("primary_missing", 24, U32),
    F::new("secondary_missing", 28, U32),
    F::new("num_groups", 32, U32),
    F::new("group_width_reference", 36, U8),
    F::new("group_width_bits", 37, U8),
    F::new("group_length_reference", 38, U32),
    F::new("group_length_increment", 42, U8),
    F::new("group_length_last", 43, U32),
    F::new("group_length_bits", 47, U8),
];

const DATA_3: &[F] = &[
    F::new("reference_value", 12, F32),
    F::new("binary_scale_factor", 16, U16).signed(),
    F::new("decimal_scale_factor", 18, U16).signed(),
    F::new("num_bits", 20, U8),
    F::new("original_type", 21, U8).code("5.1"),
    F::new("group_method", 22, U8).code("5.4"),
    F::new("missing_management", 23, U8).code("5.5"),
    F::new("primary_missing", 24, U32),
    F::new("secondary_missing", 28, U32),
    F::new("num_groups", 32, U32),
    F::new("group_width_reference", 36, U8),
    F::new("group_width_bits", 37, U8),
    F::new("group_length_reference", 38, U32),
    F::new("group_length_increment", 42, U8),
    F::new("group_length_last", 43, U32),
    F::new("group_length_bits", 47, U8),
    F::new("spatial_order", 48, U8).code("5.6"),
    F::new("extra_descriptor_octets", 49, U8),
];

const DATA_4: &[F] = &[F::new("precision", 12, U8).code("5.7")];

const DATA_41: &[F] = &[
    F::new("reference_value", 12, F32),
    F::new("binary_scale_factor", 16, U16).signed(),
    F::new("decimal_scale_factor", 18, U16).signed(),
    F::new("num_bits", 20, U8),
    F::new("original_type", 21, U8).code("5.1"),
];

pub(crate) const TEMPLATES: &[Template] = &[
    Template { section: 3, number: 0, name: "Latitude/longitude", fields: GRID_0 },
    Template { section: 3, number: 30, name: "Lambert conformal", fields: GRID_30 },
    Template {
        section: 4,
        number: 0,
        name: "Analysis or forecast at a horizontal level at a point in time",
        fields: PRODUCT_0,
    },
    Template {
        section: 4,
        number: 8,
        name: "Average, accumulation or extreme values in a continuous time interval",
        fields: PRODUCT_8,
    },
    Template { section: 5, number: 0, name: "Grid point data - simple packing", fields: DATA_0 },
    Template { section: 5, number: 2, name: "Grid point data - complex packing", fields: DATA_2 },
    Template {
        section: 5,
        number: 3,
        name: "Grid point data - complex packing and spatial differencing",
        fields: DATA_3,
    },
    Template { section: 5, number: 4, name: "Grid point data - IEEE floating point", fields: DATA_4 },
    Template { section: 5, number: 41, name: "Grid point data - PNG", fields: DATA_41 },
];
