/// The default limit for the length of the multipart boundary.
pub const DEFAULT_MAX_BOUNDARY_LENGTH: usize = 128;
/// The default limit for the total number of accumulated form values.
pub const DEFAULT_MAX_FORM_VALUE_COUNT: usize = 1024;

/// Options for parsing multipart/form-data into a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultipartFormModelOptions {
    /// The max length of the boundary extracted from the content type.
    pub max_boundary_length: usize,
    /// The max number of form values accumulated across all fields.
    pub max_form_value_count: usize,
}

impl MultipartFormModelOptions {
    /// Create a default `MultipartFormModelOptions` instance.
    #[inline]
    pub fn new() -> MultipartFormModelOptions {
        MultipartFormModelOptions {
            max_boundary_length: DEFAULT_MAX_BOUNDARY_LENGTH,
            max_form_value_count: DEFAULT_MAX_FORM_VALUE_COUNT,
        }
    }
}

impl Default for MultipartFormModelOptions {
    #[inline]
    fn default() -> Self {
        MultipartFormModelOptions::new()
    }
}
