//! Decoding of in-file string references.
//!
//! Variable-length strings in the container are stored out of line: a
//! metadata array holds one object reference per entry, and each reference
//! points at a dataset of scalar character codes (one code point per
//! element). Decoding follows the reference, reads every code, and
//! concatenates the corresponding characters.

use crate::error::{DatasetError, Result};
use hdf5::{Location, ObjectReference as _, ObjectReference1, ReferencedObject};

/// Resolves `reference` within `scope` and decodes the referenced character
/// codes into a string.
pub(crate) fn decode(scope: &Location, reference: &ObjectReference1) -> Result<String> {
    let codes = match reference.dereference(scope)? {
        ReferencedObject::Dataset(dataset) => dataset.read_raw::<u16>()?,
        _ => return Err(DatasetError::BadStringReference),
    };
    let mut decoded = String::with_capacity(codes.len());
    for code in codes {
        let code = u32::from(code);
        decoded.push(char::from_u32(code).ok_or(DatasetError::BadCharCode(code))?);
    }
    Ok(decoded)
}
