/// Capability implemented by proto-style enumerations so the codec can map
/// them to JSON numbers (by ordinal) or JSON strings (by name).
///
/// Ordinal zero is the enumeration's default value; the presence policies
/// treat it the same way they treat a zero integer.
pub trait Enumeration: Copy + Default {
    /// Builds the enumeration from its wire ordinal. Unknown ordinals are
    /// kept as-is by implementations that carry an open variant, or mapped to
    /// the default otherwise; the codec does not validate them.
    fn from_ordinal(ordinal: i32) -> Self;

    /// The wire ordinal of this value.
    fn ordinal(self) -> i32;

    /// Resolves a JSON name to a value. `None` makes the decoder record an
    /// unknown-enum error.
    fn from_name(name: &str) -> Option<Self>;

    /// The JSON name of this value.
    fn name(self) -> &'static str;
}
