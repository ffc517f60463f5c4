use crate::grib::sections::fields::{decode_fields, Fields};
use crate::grib::tables::{self, FieldSpec};
use crate::grib::{GribError, Result};

/// Layout of a templated section: the fixed `prefix` followed by the fields
/// of template `section.template_number`. The prefix is left untouched.
pub(crate) fn resolve_template(
    prefix: &[FieldSpec],
    section: u8,
    template_number: u16,
) -> Result<Vec<FieldSpec>> {
    let template = tables::template(section, template_number).ok_or(
        GribError::UnsupportedTemplate {
            section,
            template: template_number,
        },
    )?;

    Ok(prefix.iter().chain(template.fields).copied().collect())
}

/// Decodes the prefix to learn the template number, then the whole section
/// with the resolved layout.
pub(crate) fn decode_templated(
    bytes: &[u8],
    section: u8,
    prefix: &[FieldSpec],
) -> Result<(u16, Fields)> {
    let head = decode_fields(prefix, bytes)?;
    let template_number = head.uint("template_number")? as u16;
    let layout = resolve_template(prefix, section, template_number)?;
    debug!(
        "Section {} uses template {}.{} ({} fields)",
        section,
        section,
        template_number,
        layout.len()
    );

    Ok((template_number, decode_fields(&layout, bytes)?))
}
