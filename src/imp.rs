/// Implements `Serialize` and `Deserialize` through the `Display` and
/// `FromStr` implementations of a type.
macro_rules! impl_serde_str {
    ($Ty:ty, $name:literal) => {
        #[cfg(feature = "serde")]
        impl serde::Serialize for $Ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $Ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(|e| {
                    <D::Error as serde::de::Error>::custom(format_args!(
                        "failed to parse {s:?} as {}: {e}",
                        $name
                    ))
                })
            }
        }
    };
}

pub(crate) use impl_serde_str;
