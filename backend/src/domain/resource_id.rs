//! UUID-backed identifier newtypes for owned resources.

/// Error returned when an identifier string is not a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a valid UUID")]
pub struct InvalidResourceId;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Parse the identifier from its canonical string form.
            pub fn new(
                id: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::resource_id::InvalidResourceId> {
                uuid::Uuid::parse_str(id.as_ref())
                    .map(Self)
                    .map_err(|_| $crate::domain::resource_id::InvalidResourceId)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub(crate) use resource_id;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    resource_id! {
        /// Identifier used only by these tests.
        ExampleId
    }

    #[rstest]
    fn parses_and_displays_uuid() {
        let raw = "6f0c3bb8-6a36-4d5e-9a31-3f3e1e0b2f10";
        let id = ExampleId::new(raw).expect("valid uuid");
        assert_eq!(id.to_string(), raw);
        assert_eq!(ExampleId::from_uuid(*id.as_uuid()), id);
    }

    #[rstest]
    fn rejects_non_uuid() {
        assert!(ExampleId::new("42").is_err());
    }

    #[rstest]
    fn random_ids_differ() {
        assert_ne!(ExampleId::random(), ExampleId::random());
    }
}
