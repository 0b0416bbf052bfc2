use std::any::type_name;

use crate::form_value::FormValueError;
use crate::form_value_accumulator::FormValueAccumulator;
use crate::MultipartFormModelError;

/// One bindable field of a model: its form key and its bind function.
///
/// The table of descriptors is built once per model type as a constant, so binding
/// never has to inspect types at runtime.
pub struct FormFieldDescriptor<M> {
    /// The form key this field is looked up by. Exact match, case-sensitive.
    pub name: &'static str,
    /// Convert the accumulated values for `name` and assign them onto the model.
    pub bind: fn(&mut M, &[String]) -> Result<(), FormValueError>,
}

/// A type whose fields can be populated from accumulated form values.
///
/// Usually implemented with the [`form_model!`](crate::form_model) macro. The
/// `'static` bound is what lets the field-descriptor table live in a constant.
pub trait FormModel: Default + 'static {
    /// The field-descriptor table for this model.
    const FIELDS: &'static [FormFieldDescriptor<Self>];
}

/// Bind accumulated form values onto a fresh instance of `M`.
///
/// Keys with no matching field are ignored; fields with no matching key keep their
/// default value. Any conversion failure aborts the whole binding.
pub fn bind_model<M: FormModel>(
    form: &FormValueAccumulator,
) -> Result<M, MultipartFormModelError> {
    let mut model = M::default();

    for descriptor in M::FIELDS {
        let values = match form.get(descriptor.name) {
            Some(values) => values,
            None => continue,
        };

        (descriptor.bind)(&mut model, values).map_err(|source| {
            MultipartFormModelError::ModelBindingFailed {
                model: type_name::<M>(),
                field: descriptor.name,
                source,
            }
        })?;
    }

    Ok(model)
}

/// Define a struct that is both a bindable [`FormModel`] and an encodable
/// [`FormSource`](crate::FormSource).
///
/// Each field may carry an explicit form key after `=>`; the field name itself is the
/// key otherwise.
///
/// ```rust
/// use multipart_form_model::form_model;
///
/// form_model! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct UploadRequest {
///         pub text_property: String => "TextProperty",
///         pub int_property: i32 => "IntProperty",
///         pub array_property: Vec<String> => "ArrayProperty",
///     }
/// }
/// ```
#[macro_export]
macro_rules! form_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty $(=> $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::FormModel for $name {
            const FIELDS: &'static [$crate::FormFieldDescriptor<Self>] = {
                $(
                    fn $field(
                        model: &mut $name,
                        values: &[::std::string::String],
                    ) -> ::std::result::Result<(), $crate::FormValueError> {
                        model.$field = $crate::FormFieldBind::bind_form_values(values)?;

                        ::std::result::Result::Ok(())
                    }
                )*

                &[
                    $(
                        $crate::FormFieldDescriptor {
                            name: $crate::form_model!(@key $field $(=> $key)?),
                            bind: $field,
                        },
                    )*
                ]
            };
        }

        impl $crate::FormSource for $name {
            fn form_fields(
                &self,
            ) -> ::std::vec::Vec<(&'static str, $crate::FormFieldValue)> {
                ::std::vec![
                    $(
                        (
                            $crate::form_model!(@key $field $(=> $key)?),
                            $crate::ToFormField::to_form_field(&self.$field),
                        ),
                    )*
                ]
            }
        }
    };
    (@key $field:ident) => {
        ::core::stringify!($field)
    };
    (@key $field:ident => $key:literal) => {
        $key
    };
}
