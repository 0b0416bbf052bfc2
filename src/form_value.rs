use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// A form value could not be converted into a scalar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValueError {
    /// The submitted text.
    pub value: String,
    /// The name of the scalar type the text was supposed to become.
    pub expected: &'static str,
}

impl Display for FormValueError {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_fmt(format_args!("`{}` is not a valid {}.", self.value, self.expected))
    }
}

impl Error for FormValueError {}

/// A scalar that can cross the form-data text boundary in both directions.
pub trait FormValue: Sized {
    /// Convert submitted text into this scalar.
    fn from_form_value(value: &str) -> Result<Self, FormValueError>;

    /// Render this scalar as form-data text.
    fn to_form_value(&self) -> String;
}

impl FormValue for String {
    #[inline]
    fn from_form_value(value: &str) -> Result<String, FormValueError> {
        Ok(value.to_string())
    }

    #[inline]
    fn to_form_value(&self) -> String {
        self.clone()
    }
}

/// How a model field consumes the accumulated values for its key.
///
/// Scalars take the first value and silently drop the rest; `Vec` fields take every
/// value in submission order; `Option` fields take the first value, `Some`-wrapped.
pub trait FormFieldBind: Sized {
    fn bind_form_values(values: &[String]) -> Result<Self, FormValueError>;
}

/// How an encoder source field is expanded into outgoing parts.
pub trait ToFormField {
    fn to_form_field(&self) -> FormFieldValue;
}

/// The classified value of one encoder source field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFieldValue {
    /// One part, named after the field.
    Scalar(String),
    /// One part per element, all named with the `[]` suffix.
    List(Vec<String>),
    /// No representable value. Encoding rejects it.
    Missing,
}

macro_rules! impl_form_value_scalar {
    ( $($t:ty),* $(,)? ) => {
        $(
            impl FormValue for $t {
                #[inline]
                fn from_form_value(value: &str) -> Result<$t, FormValueError> {
                    value.parse::<$t>().map_err(|_| FormValueError {
                        value: value.to_string(),
                        expected: stringify!($t),
                    })
                }

                #[inline]
                fn to_form_value(&self) -> String {
                    self.to_string()
                }
            }

            impl FormFieldBind for $t {
                #[inline]
                fn bind_form_values(values: &[String]) -> Result<$t, FormValueError> {
                    let first = values.first().map(String::as_str).unwrap_or_default();

                    FormValue::from_form_value(first)
                }
            }

            impl ToFormField for $t {
                #[inline]
                fn to_form_field(&self) -> FormFieldValue {
                    FormFieldValue::Scalar(self.to_form_value())
                }
            }
        )*
    };
}

impl_form_value_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl FormFieldBind for String {
    #[inline]
    fn bind_form_values(values: &[String]) -> Result<String, FormValueError> {
        Ok(values.first().cloned().unwrap_or_default())
    }
}

impl ToFormField for String {
    #[inline]
    fn to_form_field(&self) -> FormFieldValue {
        FormFieldValue::Scalar(self.clone())
    }
}

impl<T: FormValue> FormFieldBind for Vec<T> {
    fn bind_form_values(values: &[String]) -> Result<Vec<T>, FormValueError> {
        values.iter().map(|value| T::from_form_value(value)).collect()
    }
}

impl<T: FormValue> FormFieldBind for Option<T> {
    fn bind_form_values(values: &[String]) -> Result<Option<T>, FormValueError> {
        match values.first() {
            Some(value) => T::from_form_value(value).map(Some),
            None => Ok(None),
        }
    }
}

impl<T: FormValue> ToFormField for Vec<T> {
    fn to_form_field(&self) -> FormFieldValue {
        FormFieldValue::List(self.iter().map(FormValue::to_form_value).collect())
    }
}

impl<T: FormValue> ToFormField for Option<T> {
    fn to_form_field(&self) -> FormFieldValue {
        match self {
            Some(value) => FormFieldValue::Scalar(value.to_form_value()),
            None => FormFieldValue::Missing,
        }
    }
}

impl<T: FormValue> ToFormField for [T] {
    fn to_form_field(&self) -> FormFieldValue {
        FormFieldValue::List(self.iter().map(FormValue::to_form_value).collect())
    }
}

impl<T: FormValue, const N: usize> ToFormField for [T; N] {
    #[inline]
    fn to_form_field(&self) -> FormFieldValue {
        self.as_ref().to_form_field()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_scalars() {
        assert_eq!(Ok(2147483647i32), i32::from_form_value("2147483647"));
        assert_eq!(Ok(true), bool::from_form_value("true"));
        assert_eq!(Ok(1.5f64), f64::from_form_value("1.5"));
        assert_eq!(Ok(String::from("text")), String::from_form_value("text"));
    }

    #[test]
    fn reports_the_expected_type_on_failure() {
        let err = i32::from_form_value("not-a-number").unwrap_err();

        assert_eq!("not-a-number", err.value);
        assert_eq!("i32", err.expected);
    }

    #[test]
    fn scalar_binding_takes_the_first_value() {
        let values = vec![String::from("1"), String::from("2")];

        assert_eq!(Ok(1i32), i32::bind_form_values(&values));
    }

    #[test]
    fn vec_binding_takes_every_value_in_order() {
        let values = vec![String::from("1"), String::from("2"), String::from("3")];

        assert_eq!(Ok(vec![1i32, 2, 3]), Vec::<i32>::bind_form_values(&values));
    }

    #[test]
    fn vec_binding_fails_on_any_bad_element() {
        let values = vec![String::from("1"), String::from("x")];

        assert!(Vec::<i32>::bind_form_values(&values).is_err());
    }

    #[test]
    fn option_binding() {
        assert_eq!(Ok(None::<i32>), Option::<i32>::bind_form_values(&[]));
        assert_eq!(
            Ok(Some(7i32)),
            Option::<i32>::bind_form_values(&[String::from("7")])
        );
    }

    #[test]
    fn classifies_encoder_fields() {
        assert_eq!(FormFieldValue::Scalar(String::from("1")), 1i32.to_form_field());
        assert_eq!(
            FormFieldValue::List(vec![String::from("1"), String::from("2")]),
            vec![1i32, 2].to_form_field()
        );
        assert_eq!(FormFieldValue::Missing, None::<i32>.to_form_field());
    }
}
