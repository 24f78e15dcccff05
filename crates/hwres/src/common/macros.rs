/// Defines a 128-bit identifier in the style of the job graph ids.
///
/// The textual form (used in logs and on the wire) is 32 lowercase hexadecimal digits.
#[macro_export]
macro_rules! define_id_type {
    ($name: ident) => {
        #[derive(
            ::std::marker::Copy,
            ::std::clone::Clone,
            ::std::default::Default,
            ::std::hash::Hash,
            ::std::cmp::Ord,
            ::std::cmp::PartialOrd,
            ::std::cmp::Eq,
            ::std::cmp::PartialEq,
        )]
        #[repr(transparent)]
        pub struct $name(u128);

        impl $name {
            #[inline]
            pub fn new(value: u128) -> Self {
                Self(value)
            }

            /// Creates a new random id.
            pub fn generate() -> Self {
                Self(::rand::random::<u128>())
            }

            #[inline]
            pub fn as_num(&self) -> u128 {
                self.0
            }
        }

        impl ::std::convert::From<u128> for $name {
            #[inline]
            fn from(value: u128) -> Self {
                Self::new(value)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{:032x}", self.0)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(self, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::num::ParseIntError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok(Self(u128::from_str_radix(s.trim(), 16)?))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let value = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                value.parse().map_err(|e| {
                    <D::Error as ::serde::de::Error>::custom(format!(
                        "invalid {} '{}': {}",
                        stringify!($name),
                        value,
                        e
                    ))
                })
            }
        }
    };
}
