use crate::error::ConfigError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a hyperparameter only takes whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Int,
    Float,
}

/// A declared tunable value with its inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HyperParameter {
    pub name: &'static str,
    pub kind: ParamKind,
    pub min: Decimal,
    pub max: Decimal,
    pub default: Decimal,
}

impl HyperParameter {
    /// Checks that `value` has the right kind and lies within `min..=max`.
    pub fn check(&self, value: Decimal) -> Result<(), ConfigError> {
        if self.kind == ParamKind::Int && !value.fract().is_zero() {
            return Err(ConfigError::ValidationError(format!(
                "`{}` must be an integer, got {}",
                self.name, value
            )));
        }
        if value < self.min || value > self.max {
            return Err(ConfigError::ValidationError(format!(
                "`{}` = {} is outside {}..={}",
                self.name, value, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// A parameter section whose fields are all declared hyperparameters.
pub trait HyperParameters {
    fn declared(&self) -> &'static [HyperParameter];

    /// Current values by name, in declaration order.
    fn values(&self) -> Vec<(&'static str, Decimal)>;

    /// Writes a value without checking it.
    fn assign(&mut self, name: &str, value: Decimal) -> Result<(), ConfigError>;

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.values() {
            let declared = self.declared().iter().find(|p| p.name == name).ok_or_else(|| {
                ConfigError::ValidationError(format!("`{}` is not a declared hyperparameter", name))
            })?;
            declared.check(value)?;
        }
        Ok(())
    }

    /// Checks `value` against the declaration of `name`, then assigns it.
    fn set(&mut self, name: &str, value: Decimal) -> Result<(), ConfigError> {
        let declared = self
            .declared()
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::ValidationError(format!("Unknown hyperparameter `{}`", name)))?;
        declared.check(value)?;
        self.assign(name, value)
    }
}

/// Declares a parameter section: the struct, its defaults and its `HyperParameters` impl.
///
/// Fields are written as `name: Type [Kind, min, max] = default`. `i64` fields are `Int`
/// parameters and `Decimal` fields are `Float` parameters.
macro_rules! hyperparameters {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ident [$kind:ident, $min:tt, $max:tt] = $default:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty ),+
        }

        impl $name {
            pub const DECLARED: &'static [$crate::hyperparameters::HyperParameter] = &[
                $(
                    $crate::hyperparameters::HyperParameter {
                        name: stringify!($field),
                        kind: $crate::hyperparameters::ParamKind::$kind,
                        min: rust_decimal_macros::dec!($min),
                        max: rust_decimal_macros::dec!($max),
                        default: rust_decimal_macros::dec!($default),
                    }
                ),+
            ];
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $crate::hyperparameters::hyperparameters!(@default $ty, $default) ),+
                }
            }
        }

        impl $crate::hyperparameters::HyperParameters for $name {
            fn declared(&self) -> &'static [$crate::hyperparameters::HyperParameter] {
                Self::DECLARED
            }

            fn values(&self) -> Vec<(&'static str, rust_decimal::Decimal)> {
                vec![ $( (stringify!($field), rust_decimal::Decimal::from(self.$field)) ),+ ]
            }

            fn assign(&mut self, name: &str, value: rust_decimal::Decimal) -> Result<(), $crate::error::ConfigError> {
                match name {
                    $( stringify!($field) => self.$field = $crate::hyperparameters::hyperparameters!(@convert $ty, name, value)?, )+
                    other => {
                        return Err($crate::error::ConfigError::ValidationError(format!(
                            "Unknown hyperparameter `{}`",
                            other
                        )))
                    }
                }
                Ok(())
            }
        }
    };
    (@default Decimal, $value:tt) => {
        rust_decimal_macros::dec!($value)
    };
    (@default i64, $value:tt) => {
        $value
    };
    (@convert Decimal, $name:expr, $value:expr) => {
        Ok::<_, $crate::error::ConfigError>($value)
    };
    (@convert i64, $name:expr, $value:expr) => {
        rust_decimal::prelude::ToPrimitive::to_i64(&$value).ok_or_else(|| {
            $crate::error::ConfigError::ValidationError(format!("`{}` does not fit an integer", $name))
        })
    };
}

pub(crate) use hyperparameters;
