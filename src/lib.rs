/*!
# Multipart Form Model

This crate parses a `multipart/form-data` request body into a strongly-typed model
while streaming the file part(s) into a caller-provided sink, and encodes objects
back into outgoing multipart bodies.

It does not implement an HTTP server: the caller hands over the request's
content-type header value and an `AsyncRead` over the body, and keeps ownership of
both the body stream and the file sink.

## Example

```rust
use std::io::Cursor;

use multipart_form_model::{
    append_form_object, form_model, MultipartBody, MultipartBodyBuilder,
    MultipartFormModel, MultipartFormModelOptions,
};

form_model! {
    #[derive(Debug, Default, PartialEq)]
    pub struct UploadRequest {
        pub text_property: String => "TextProperty",
        pub int_property: i32 => "IntProperty",
        pub array_property: Vec<String> => "ArrayProperty",
    }
}

# #[tokio::main(flavor = "current_thread")]
# async fn main() -> Result<(), multipart_form_model::MultipartFormModelError> {
// A producer builds the request body...
let request = UploadRequest {
    text_property: String::from("Text property"),
    int_property: i32::MAX,
    array_property: vec![String::from("Index 0"), String::from("Index 1")],
};

let mut body = MultipartBody::new("X-BOUNDARY");
body.append_file("file", "file.csv", b"value1, value2, value3, value4\n");
append_form_object(&mut body, &request)?;

let content_type = body.content_type();
let bytes = body.finish();

// ...and the consumer streams the file into its own sink while binding the rest.
let mut file_sink = Vec::new();

let parsed = MultipartFormModel::<UploadRequest>::parse(
    &content_type,
    Cursor::new(bytes),
    &mut file_sink,
    MultipartFormModelOptions::new(),
)
.await?;

assert_eq!(request, parsed.model);
assert_eq!(file_sink.len() as u64, parsed.file_bytes);
# Ok(())
# }
```
*/

pub extern crate mime;
pub extern crate multer;

mod form_model;
mod form_object_encoder;
mod form_value;
mod form_value_accumulator;
mod multipart_boundary;
mod multipart_form_model;
mod multipart_form_model_errors;
mod multipart_form_model_options;

pub use form_model::*;
pub use form_object_encoder::*;
pub use form_value::*;
pub use form_value_accumulator::*;
pub use multipart_boundary::extract_boundary;
pub use multipart_form_model::*;
pub use multipart_form_model_errors::*;
pub use multipart_form_model_options::*;
