use crate::error::{GeosectError, InputError, Result};
use crate::geometry::{Cuboid, Pyramid, Sphere};
use crate::math::Point3;

/// Splits `text` into exactly `N` comma-separated numbers.
///
/// Blank text means the shape was not given.
fn parse_fields<const N: usize>(shape: &'static str, text: &str) -> Result<Option<[f64; N]>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != N {
        return Err(InputError::FieldCount {
            shape,
            expected: N,
            found: fields.len(),
        }
        .into());
    }

    let mut values = [0.0; N];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| InputError::InvalidNumber {
            shape,
            field: (*field).to_string(),
        })?;
    }
    Ok(Some(values))
}

/// Re-labels a constructor failure as invalid input for `shape`.
fn invalid_shape(shape: &'static str) -> impl Fn(GeosectError) -> GeosectError {
    move |err| match err {
        GeosectError::Geometry(source) => InputError::InvalidShape { shape, source }.into(),
        other => other,
    }
}

/// Parses `x_min, y_min, z_min, x_max, y_max, z_max`.
///
/// # Errors
///
/// Returns [`InputError`] for a wrong field count, an unparsable field or
/// bounds the cuboid rejects.
pub fn parse_cuboid(text: &str) -> Result<Option<Cuboid>> {
    parse_fields::<6>("cuboid", text)?
        .map(|b| Cuboid::from_bounds(b).map_err(invalid_shape("cuboid")))
        .transpose()
}

/// Parses `cx, cy, cz, r`.
///
/// # Errors
///
/// Returns [`InputError`] for a wrong field count, an unparsable field or a
/// negative radius.
pub fn parse_sphere(text: &str) -> Result<Option<Sphere>> {
    parse_fields::<4>("sphere", text)?
        .map(|[x, y, z, r]| Sphere::new(Point3::new(x, y, z), r).map_err(invalid_shape("sphere")))
        .transpose()
}

/// Parses the apex followed by the four base vertices, 15 numbers in all.
///
/// # Errors
///
/// Returns [`InputError`] for a wrong field count, an unparsable field or
/// a degenerate pyramid.
pub fn parse_pyramid(text: &str) -> Result<Option<Pyramid>> {
    parse_fields::<15>("pyramid", text)?
        .map(|c| Pyramid::from_coords(c).map_err(invalid_shape("pyramid")))
        .transpose()
}
