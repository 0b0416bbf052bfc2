use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

use crate::multer;

use crate::form_value::FormValueError;

#[derive(Debug)]
pub enum MultipartFormModelError {
    /// The content type is not `multipart/*`. Carries the offending content type.
    NotMultipart(String),
    /// The content type carries no usable `boundary` parameter.
    MissingBoundary,
    /// The boundary exceeds the configured length limit. Carries the limit.
    BoundaryTooLong(usize),
    /// A section's content disposition is absent, malformed, or not `form-data`.
    ContentTypeInvalid,
    /// Too many form values were accumulated. Carries the limit.
    ValueCountLimitExceeded(usize),
    /// A form value could not be converted into its target field.
    ModelBindingFailed {
        model: &'static str,
        field: &'static str,
        source: FormValueError,
    },
    /// A field of an encoder source object has no representable value.
    NullFieldValue(&'static str),
    IOError(io::Error),
    MulterError(multer::Error),
}

impl From<io::Error> for MultipartFormModelError {
    #[inline]
    fn from(err: io::Error) -> MultipartFormModelError {
        MultipartFormModelError::IOError(err)
    }
}

impl From<multer::Error> for MultipartFormModelError {
    #[inline]
    fn from(err: multer::Error) -> MultipartFormModelError {
        MultipartFormModelError::MulterError(err)
    }
}

impl Display for MultipartFormModelError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            MultipartFormModelError::NotMultipart(content_type) => f.write_fmt(format_args!(
                "Expected a multipart request, but got `{}`.",
                content_type
            )),
            MultipartFormModelError::MissingBoundary => {
                f.write_str("Missing content-type boundary.")
            },
            MultipartFormModelError::BoundaryTooLong(limit) => {
                f.write_fmt(format_args!("Multipart boundary length limit {} exceeded.", limit))
            },
            MultipartFormModelError::ContentTypeInvalid => {
                f.write_str("A section's content disposition is missing or invalid.")
            },
            MultipartFormModelError::ValueCountLimitExceeded(limit) => {
                f.write_fmt(format_args!("Form value count limit {} exceeded.", limit))
            },
            MultipartFormModelError::ModelBindingFailed {
                model,
                field,
                source,
            } => f.write_fmt(format_args!(
                "Could not bind the field `{}` of the model `{}`: {}",
                field, model, source
            )),
            MultipartFormModelError::NullFieldValue(field) => {
                f.write_fmt(format_args!("The field `{}` has no value to encode.", field))
            },
            MultipartFormModelError::IOError(err) => Display::fmt(err, f),
            MultipartFormModelError::MulterError(err) => Display::fmt(err, f),
        }
    }
}

impl Error for MultipartFormModelError {}
