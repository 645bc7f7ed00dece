use super::model::LocalZone;

/// Metadata for a field-less enum, standing in for runtime reflection.
///
/// Implement it with [`enum_contract!`](crate::enum_contract) rather than by hand.
pub trait EnumContract: Sized + Copy + PartialEq + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    fn name(&self) -> &'static str;

    /// Integer discriminant.
    fn value(&self) -> i64;

    fn description(&self) -> Option<&'static str> {
        None
    }

    /// Value used when input can't be mapped to a variant: the variant named
    /// `Undefined` (ignoring case and underscores) or else the first one.
    fn fallback() -> Self;
}

/// Supplies the zone local date-times are expressed in, e.g. from the
/// current request.
pub trait TimeZoneProvider: Send + Sync {
    fn zone(&self) -> LocalZone;
}

impl<F> TimeZoneProvider for F
where
    F: Fn() -> LocalZone + Send + Sync,
{
    fn zone(&self) -> LocalZone {
        self()
    }
}
