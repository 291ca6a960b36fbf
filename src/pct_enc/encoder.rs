#![allow(missing_debug_implementations)]

//! Percent-encoders for ZIP-321 parameter values.

use super::{table::*, Encoder, Table};

/// An encoder for `qchar` values: `label`, `message` and extension parameters.
///
/// Everything outside `unreserved`, the allowed delimiters `! $ ' ( ) * + , ;`,
/// `:` and `@` is percent-encoded, which keeps `&`, `=`, `%` and `?` out of
/// the raw value.
pub struct Qchar(());

impl Encoder for Qchar {
    const TABLE: Table = QCHAR;
}
