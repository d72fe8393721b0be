//! Google encoded polyline codec (precision 1e5)
//!
//! Format reference: <https://developers.google.com/maps/documentation/utilities/polylinealgorithm>

use domain::Coordinate;

use crate::error::MapsError;

const PRECISION: f64 = 1e5;

/// Encode coordinates into a polyline string
#[must_use]
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let (mut prev_lat, mut prev_lon) = (0_i64, 0_i64);

    for point in points {
        let lat = scale(point.latitude());
        let lon = scale(point.longitude());
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }
    out
}

/// Decode a polyline string into coordinates
///
/// # Errors
///
/// Returns `MapsError::ParseError` for truncated input, bytes outside the
/// polyline alphabet, or points outside the valid coordinate range.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, MapsError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let (mut lat, mut lon) = (0_i64, 0_i64);
    let mut points = Vec::new();

    while index < bytes.len() {
        lat += decode_value(bytes, &mut index)?;
        lon += decode_value(bytes, &mut index)?;

        #[allow(clippy::cast_precision_loss)]
        let point = Coordinate::new(lat as f64 / PRECISION, lon as f64 / PRECISION)
            .map_err(|e| MapsError::ParseError(format!("polyline point: {e}")))?;
        points.push(point);
    }
    Ok(points)
}

#[allow(clippy::cast_possible_truncation)]
fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= 0x20 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        out.push(char::from((((value & 0x1f) | 0x20) + 63) as u8));
        value >>= 5;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    out.push(char::from((value + 63) as u8));
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, MapsError> {
    let mut result = 0_i64;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| MapsError::ParseError("truncated polyline".to_string()))?;
        *index += 1;

        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(MapsError::ParseError(format!(
                "invalid polyline byte {byte:#04x}"
            )));
        }
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
