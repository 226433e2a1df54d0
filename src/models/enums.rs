use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = RegistryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(RegistryError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(FieldType {
    Number => "number",
    Text => "text",
    Textarea => "textarea",
    Select => "select",
});

str_enum!(Priority {
    Routine => "routine",
    Normal => "normal",
    Urgent => "urgent",
    Stat => "stat",
});

str_enum!(ValidationStatus {
    Normal => "normal",
    Warning => "warning",
    Error => "error",
});

impl ValidationStatus {
    /// Presentation hint for the hosting UI.
    pub fn color_class(&self) -> &'static str {
        match self {
            Self::Normal => "range-normal",
            Self::Warning => "range-warning",
            Self::Error => "range-error",
        }
    }
}
